#![allow(dead_code, unreachable_pub)]

use fxhash::FxHashMap;
use mcs_animate::{BoxMetrics, Display, ElementId, RenderSurface, StyleProperty, parse_px};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// In-memory render tree: stylesheet display + natural metrics + inline overrides.
#[derive(Debug, Default)]
pub struct FakeSurface {
    elements: Mutex<FxHashMap<ElementId, FakeElement>>,
    next_id: AtomicU64,
}

#[derive(Debug)]
struct FakeElement {
    attached: bool,
    stylesheet_display: &'static str,
    natural: BoxMetrics,
    inline: FxHashMap<StyleProperty, String>,
    flushes: usize,
}

impl FakeSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Adds an element; `hidden` means the stylesheet resolves its display to `none`.
    pub fn add(&self, natural: BoxMetrics, hidden: bool) -> ElementId {
        let id = ElementId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let element = FakeElement {
            attached: true,
            stylesheet_display: if hidden { "none" } else { "block" },
            natural,
            inline: FxHashMap::default(),
            flushes: 0,
        };
        self.elements.lock().insert(id, element);
        id
    }

    pub fn detach(&self, id: ElementId) {
        if let Some(element) = self.elements.lock().get_mut(&id) {
            element.attached = false;
        }
    }

    pub fn inline(&self, id: ElementId, property: StyleProperty) -> Option<String> {
        self.elements.lock().get(&id).and_then(|e| e.inline.get(&property).cloned())
    }

    pub fn inline_px(&self, id: ElementId, property: StyleProperty) -> Option<f64> {
        self.inline(id, property).as_deref().and_then(parse_px)
    }

    /// Whether any box or overflow override is still written inline.
    pub fn has_overrides(&self, id: ElementId) -> bool {
        self.elements.lock().get(&id).is_some_and(|e| {
            StyleProperty::BOX
                .iter()
                .chain([StyleProperty::Overflow].iter())
                .any(|p| e.inline.contains_key(p))
        })
    }

    pub fn flushes(&self, id: ElementId) -> usize {
        self.elements.lock().get(&id).map_or(0, |e| e.flushes)
    }

    pub fn style_count(&self, id: ElementId) -> usize {
        self.elements.lock().get(&id).map_or(0, |e| e.inline.len())
    }
}

impl RenderSurface for FakeSurface {
    fn is_attached(&self, element: ElementId) -> bool {
        self.elements.lock().get(&element).is_some_and(|e| e.attached)
    }

    fn computed_display(&self, element: ElementId) -> Display {
        let elements = self.elements.lock();
        let Some(e) = elements.get(&element) else {
            return Display::NONE;
        };
        match e.inline.get(&StyleProperty::Display) {
            Some(value) => Display::new(value.clone()),
            None => Display::new(e.stylesheet_display),
        }
    }

    fn current_metrics(&self, element: ElementId) -> BoxMetrics {
        if self.computed_display(element).is_none() {
            return BoxMetrics::ZERO;
        }
        let elements = self.elements.lock();
        let Some(e) = elements.get(&element) else {
            return BoxMetrics::ZERO;
        };
        let mut metrics = e.natural;
        for property in StyleProperty::BOX {
            if let Some(value) = e.inline.get(&property).and_then(|v| parse_px(v)) {
                metrics.set(property, value);
            }
        }
        metrics
    }

    fn set_style(&self, element: ElementId, property: StyleProperty, value: &str) {
        if let Some(e) = self.elements.lock().get_mut(&element) {
            e.inline.insert(property, value.to_owned());
        }
    }

    fn remove_style(&self, element: ElementId, property: StyleProperty) {
        if let Some(e) = self.elements.lock().get_mut(&element) {
            e.inline.remove(&property);
        }
    }

    fn flush_layout(&self, element: ElementId) {
        if let Some(e) = self.elements.lock().get_mut(&element) {
            e.flushes += 1;
        }
    }
}

pub const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Lets paused time run for `duration`, then gives spawned transitions a chance to finish.
pub async fn settle(duration: Duration) {
    tokio::time::sleep(duration).await;
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

pub fn panel(height: f64) -> BoxMetrics {
    BoxMetrics { height, padding_top: 8.0, padding_bottom: 8.0, ..BoxMetrics::ZERO }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

use std::fmt::Write as _;
use std::path::PathBuf;
use std::{env, fs};

const BUILD_PREFIX: &str = "MCS_";
// Double underscore marks shell settings overrides (`MCS__LOGGING__LEVEL`), not dashboard values.
const SETTINGS_PREFIX: &str = "MCS__";
// Never created. Cargo cannot watch a variable prefix, so a missing input makes it rerun this
// script on every build and newly exported `MCS_*` variables are always seen.
const ALWAYS_RERUN: &str = "build.rs.always-rerun";

fn main() {
    let mut captured: Vec<(String, String)> = env::vars()
        .filter(|(key, _)| key.starts_with(BUILD_PREFIX) && !key.starts_with(SETTINGS_PREFIX))
        .collect();
    captured.sort();

    let mut out = String::from("static CAPTURED: &[(&str, &str)] = &[\n");
    for (key, value) in &captured {
        let _ = writeln!(out, "    ({key:?}, {value:?}),");
    }
    out.push_str("];\n");

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR for build scripts"));
    let target = out_dir.join("build_env.rs");
    // Unchanged tables keep their timestamp.
    if fs::read_to_string(&target).ok().as_deref() != Some(out.as_str()) {
        fs::write(&target, out).expect("failed to write the build-time table");
    }

    println!("cargo:rerun-if-changed={ALWAYS_RERUN}");
    println!("cargo:rerun-if-changed=build.rs");
}

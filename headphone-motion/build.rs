use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=HEADPHONE_MOTION_LIB_DIR");
    println!("cargo:rerun-if-env-changed=HEADPHONE_MOTION_LIB");

    if !cfg!(feature = "coremotion") {
        return;
    }

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap();
    if target_os != "ios" {
        return;
    }

    println!("cargo:rustc-link-lib=framework=CoreMotion");
    println!("cargo:rustc-link-lib=framework=Foundation");

    // The native shim around CMHeadphoneMotionManager. When no directory is
    // given the host application is expected to link it.
    if let Ok(lib_dir) = env::var("HEADPHONE_MOTION_LIB_DIR") {
        let lib = env::var("HEADPHONE_MOTION_LIB").unwrap_or_else(|_| "HeadphoneMotion".into());
        println!("cargo:rustc-link-search=native={}", lib_dir);
        println!("cargo:rustc-link-lib=static={}", lib);
    }
}

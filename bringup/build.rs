// bringup/build.rs
use std::path::PathBuf;

fn main() {
    let target = std::env::var("TARGET").unwrap_or_default();

    // The image gets the linker script; host test builds of the library do not
    println!("cargo:rerun-if-changed=memory.ld");
    println!("cargo:rerun-if-env-changed=LOG");

    if target.contains("riscv") {
        // Absolute path to memory.ld (robust across cargo working dirs)
        let script = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap()).join("memory.ld");

        // Only the image binary links against it
        println!("cargo:rustc-link-arg-bins=-T{}", script.display());
        println!("cargo:rustc-link-arg-bins=-Map=bringup.map");
    }
}

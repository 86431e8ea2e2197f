fn main() {
    // Askama reads templates at compile time; make sure editing one
    // triggers a rebuild.
    println!("cargo:rerun-if-changed=templates");
}

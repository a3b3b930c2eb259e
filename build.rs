// Sample programs generate tests through `test_generator::test_resources`, which expands its glob at compile time.
// Rebuild whenever a sample changes, or a new one is added.
fn main() {
    build_deps::rerun_if_changed_paths("samples/**/*.tl").expect("Sample glob should be valid");
    build_deps::rerun_if_changed_paths("samples/*").expect("Sample glob should be valid");
}

use locsync::Synchronizer;

/// Print the glob patterns a file watcher should ignore, one per line.
pub fn run_patterns_command(resources: &str) -> Result<(), String> {
    if resources.trim().is_empty() {
        return Err("Resources directory cannot be empty".to_string());
    }
    for pattern in Synchronizer::new(resources).exclusion_patterns() {
        println!("{}", pattern.display());
    }
    Ok(())
}

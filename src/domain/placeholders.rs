/// Go template directives requested from `<runtime> ps --format`.
///
/// The order defines the column order of every output line, and the parser
/// re-associates split fields with names by position, so it must never change
/// independently of [`field_names`].
pub const PS_PLACEHOLDERS: [&str; 12] = [
    ".ID",         // Container ID
    ".Image",      // Image ID
    ".Command",    // Quoted command
    ".CreatedAt",  // Time when the container was created
    ".RunningFor", // Elapsed time since the container was started
    ".Ports",      // Exposed ports
    ".Status",     // Container status
    ".Size",       // Container disk size
    ".Names",      // Container names
    ".Labels",     // All labels assigned to the container
    ".Mounts",     // Names of the volumes mounted in this container
    ".Networks",   // Networks attached to the container
];

/// Separator placed between two columns of one output line.
pub const FIELD_SEPARATOR: &str = "||";

/// Converts a placeholder token into the attribute name used by
/// [`ContainerInstance`](super::ContainerInstance), e.g. `.CreatedAt` -> `createdat`.
pub fn normalise_placeholder(placeholder: &str) -> String {
    placeholder
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Attribute names in column order.
pub fn field_names() -> Vec<String> {
    PS_PLACEHOLDERS
        .iter()
        .map(|placeholder| normalise_placeholder(placeholder))
        .collect()
}

/// The `--format` argument: every placeholder wrapped in `{{ }}`, joined by
/// [`FIELD_SEPARATOR`] and quoted as a whole.
pub fn format_string() -> String {
    let wrapped: Vec<String> = PS_PLACEHOLDERS
        .iter()
        .map(|placeholder| format!("{{{{{placeholder}}}}}"))
        .collect();

    format!("\"{}\"", wrapped.join(FIELD_SEPARATOR))
}

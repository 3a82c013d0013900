use std::fmt::Write;

/// One listed object: its name followed by display fields in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    fields: Vec<(&'static str, String)>,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    pub fn field(mut self, key: &'static str, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.fields.push((key, value.to_string()));
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Render `get` output.
///
/// ```text
/// pods信息:
///   NAME: web-0
///     READY: 1/1
/// ```
pub fn format_records(kind: &str, records: &[ResourceRecord]) -> String {
    let mut out = format!("{kind}信息:");
    for record in records {
        let _ = write!(out, "\n  NAME: {}", record.name);
        for (key, value) in &record.fields {
            let _ = write!(out, "\n    {}: {value}", key.to_uppercase());
        }
    }
    out
}

/// CPU and memory usage of a pod, node or container, already humanized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    pub cpu: String,
    pub memory: String,
}

/// A `top` line: an object's usage plus per-container usage for pods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    pub name: String,
    pub usage: Option<Usage>,
    pub containers: Vec<(String, Usage)>,
}

/// Render `top` output.
pub fn format_usage(kind: &str, entries: &[UsageEntry]) -> String {
    let mut out = format!("{kind}資源占用信息:");
    for entry in entries {
        let _ = write!(out, "\n  NAME: {}", entry.name);
        if let Some(usage) = &entry.usage {
            write_usage(&mut out, usage, "    ");
        }
        for (container, usage) in &entry.containers {
            let _ = write!(out, "\n    CONTAINER: {container}");
            write_usage(&mut out, usage, "      ");
        }
    }
    out
}

fn write_usage(out: &mut String, usage: &Usage, indent: &str) {
    let _ = write!(out, "\n{indent}CPU: {}", usage.cpu);
    let _ = write!(out, "\n{indent}MEMORY: {}", usage.memory);
}

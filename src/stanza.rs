//! Parsing of the inspector's stanza output - the `Key: value` blocks
//! emitted by `dpkg -s`

use serde::Serialize;
use std::collections::HashMap;

/// Metadata for a single package, keyed by stanza field name.
///
/// Produced only by [`PackageInfo::parse`]; immutable once returned. Field
/// order is not preserved - the stanza format does not make it meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageInfo {
    fields: HashMap<String, String>,
}

impl PackageInfo {
    /// Parse stanza text into a field mapping.
    ///
    /// Lines starting at column 0 open a new field and split on the first
    /// colon; later colons stay in the value. A line with a single leading
    /// space continues the current value, concatenated without a separator -
    /// real inspector output carries its own spacing, so none is inserted.
    /// The literal ` .` line is a paragraph break and becomes a blank line.
    ///
    /// The parser never fails: empty or whitespace-only input yields an
    /// empty mapping, a colon-less line becomes a key with an empty value,
    /// and a repeated key keeps its last value.
    pub fn parse(output: &str) -> Self {
        let mut fields = HashMap::new();
        if output.trim().is_empty() {
            return Self { fields };
        }

        let mut current_key: Option<String> = None;
        let mut current_value = String::new();

        for line in output.split('\n') {
            if !line.starts_with(' ') {
                commit(&mut fields, current_key.take(), std::mem::take(&mut current_value));
                match line.split_once(':') {
                    Some((key, rest)) => {
                        current_key = Some(key.to_string());
                        current_value = rest.trim().to_string();
                    }
                    None => {
                        current_key = Some(line.to_string());
                    }
                }
            } else if line == " ." {
                // Explicit paragraph separator inside a multi-line value
                current_value.push_str("\n\n");
            } else {
                current_value.push_str(line.trim());
            }
        }

        commit(&mut fields, current_key, current_value);

        Self { fields }
    }

    /// Value of a stanza field, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The `Package` field.
    pub fn name(&self) -> Option<&str> {
        self.get("Package")
    }

    /// The `Version` field.
    pub fn version(&self) -> Option<&str> {
        self.get("Version")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all fields, in no particular order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_fields(self) -> HashMap<String, String> {
        self.fields
    }
}

/// Commit a finished field. A blank line parses as a field with an empty
/// key; inspector output always ends with one, and it must not produce an
/// empty-string entry.
fn commit(fields: &mut HashMap<String, String>, key: Option<String>, value: String) {
    if let Some(key) = key
        && !key.is_empty()
    {
        fields.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fields() {
        let info = PackageInfo::parse("Package: redis-server\nVersion: 1.0\n");
        assert_eq!(info.len(), 2);
        assert_eq!(info.get("Package"), Some("redis-server"));
        assert_eq!(info.get("Version"), Some("1.0"));
    }

    #[test]
    fn test_empty_input() {
        assert!(PackageInfo::parse("").is_empty());
    }

    #[test]
    fn test_whitespace_only_input() {
        assert!(PackageInfo::parse("  \n \t \n").is_empty());
    }

    #[test]
    fn test_values_are_trimmed() {
        let info = PackageInfo::parse("Package:   nginx   \nPriority:\toptional\n");
        assert_eq!(info.get("Package"), Some("nginx"));
        assert_eq!(info.get("Priority"), Some("optional"));
    }

    #[test]
    fn test_continuation_concatenates_without_separator() {
        let info = PackageInfo::parse("Description: a\n b");
        assert_eq!(info.get("Description"), Some("ab"));
    }

    #[test]
    fn test_lone_dot_is_a_paragraph_break() {
        let info = PackageInfo::parse("Description: a\n .\n b");
        assert_eq!(info.get("Description"), Some("a\n\nb"));
    }

    #[test]
    fn test_line_without_colon_becomes_empty_valued_key() {
        let info = PackageInfo::parse("Status");
        assert_eq!(info.get("Status"), Some(""));
    }

    #[test]
    fn test_colons_in_value_survive() {
        let info = PackageInfo::parse("Homepage: https://redis.io:443/\n");
        assert_eq!(info.get("Homepage"), Some("https://redis.io:443/"));
    }

    #[test]
    fn test_empty_value_after_colon() {
        let info = PackageInfo::parse("Conffiles:\nPackage: x\n");
        assert_eq!(info.get("Conffiles"), Some(""));
        assert_eq!(info.get("Package"), Some("x"));
    }

    #[test]
    fn test_empty_value_extended_by_continuation() {
        let info = PackageInfo::parse("Conffiles:\n /etc/redis/redis.conf abc123\n");
        assert_eq!(info.get("Conffiles"), Some("/etc/redis/redis.conf abc123"));
    }

    #[test]
    fn test_duplicate_key_keeps_last_value() {
        let first = "Package: redis-server\nVersion: 1.0\n";
        let second = "Version: 2.0\n";
        let info = PackageInfo::parse(&format!("{first}{second}"));
        assert_eq!(info.get("Version"), Some("2.0"));
        assert_eq!(info.get("Package"), Some("redis-server"));
    }

    #[test]
    fn test_trailing_newline_adds_no_empty_key() {
        let info = PackageInfo::parse("Package: x\n\n");
        assert_eq!(info.len(), 1);
        assert_eq!(info.get(""), None);
    }

    #[test]
    fn test_realistic_dpkg_stanza() {
        let text = "Package: redis-server\n\
                    Status: install ok installed\n\
                    Priority: optional\n\
                    Version: 5:6.0.16-1+deb11u2\n\
                    Depends: lsb-base (>= 3.2-14), redis-tools (= 5:6.0.16-1+deb11u2)\n\
                    Description: Persistent key-value database with network interface\n\
                    \x20Redis is a key-value database in a similar vein to memcache\n\
                    \x20but the dataset is non-volatile.\n\
                    \x20.\n\
                    \x20The dataset is stored entirely in memory.\n\
                    Homepage: https://redis.io/\n";
        let info = PackageInfo::parse(text);
        assert_eq!(info.name(), Some("redis-server"));
        assert_eq!(info.version(), Some("5:6.0.16-1+deb11u2"));
        assert_eq!(info.get("Status"), Some("install ok installed"));
        assert_eq!(
            info.get("Description"),
            Some(
                "Persistent key-value database with network interface\
                 Redis is a key-value database in a similar vein to memcache\
                 but the dataset is non-volatile.\n\nThe dataset is stored entirely in memory."
            )
        );
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let info = PackageInfo::parse("Package: x\n");
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["Package"], "x");
    }
}

use crate::config::{Group, Store, ROOT_PATH};

/// One level of nesting.
pub const INDENT: &str = "    ";

/// Regenerate canonical GCF text from a store.
///
/// Global keys come first at column 0, followed by a depth-first, pre-order
/// walk of the groups. Comments and original layout are not preserved.
pub fn write_document(store: &Store) -> String {
    let mut out = String::new();
    for (key, value) in store.globals() {
        out.push_str(&format!("{} = {}\n", key, value.to_literal()));
    }
    for group in store.sub_groups_for_path(ROOT_PATH) {
        write_group(store, group, 0, &mut out);
    }
    out
}

fn write_group(store: &Store, group: &Group, level: usize, out: &mut String) {
    let prefix = INDENT.repeat(level);

    out.push_str(&format!("{}[{}]\n", prefix, group.name()));
    for (key, value) in group.keys() {
        out.push_str(&format!("{}{}{} = {}\n", prefix, INDENT, key, value.to_literal()));
    }
    for child in store.sub_groups_for_path(group.path()) {
        write_group(store, child, level + 1, out);
    }
    out.push_str(&format!("{}[/{}]\n", prefix, group.name()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::Settings;

    fn parse(input: &str) -> Store {
        Parser::new(input)
            .and_then(|mut p| p.parse_document())
            .expect("Failed to parse document")
    }

    #[test]
    fn test_write_nested_document() {
        let input = r#"
host = "local"
[Net]
    port = 8080
    [Sub]
        ok = true
    [/Sub]
[/Net]
"#;
        let expected = "host = \"local\"\n\
                        [Net]\n    port = 8080\n    [Sub]\n        ok = true\n    [/Sub]\n[/Net]\n";
        assert_eq!(write_document(&parse(input)), expected);
    }

    #[test]
    fn test_writer_drops_comments_and_normalizes_layout() {
        let input = "# heading\n[A]   # trailing\n x=1.5   y = \"  padded  \"\n[/A]";
        assert_eq!(
            write_document(&parse(input)),
            "[A]\n    x = 1.5\n    y = \"padded\"\n[/A]\n"
        );
    }

    #[test]
    fn test_round_trip_is_structurally_equal() {
        let input = r#"
name = "app"
version = 3
ratio = 0.25
[Server]
    host = "example.org"
    port = 443
    secure = TRUE
    weight = 12.0
    [Limits]
        max = 9000000000
        min = -5
    [/Limits]
    [2nd-level_x]
    [/2nd-level_x]
[/Server]
[Client]
    retries = 3
    app = ${name}
[/Client]
"#;
        let first = parse(input);
        let text = write_document(&first);
        let second = parse(&text);
        assert_eq!(first, second);
        assert_eq!(write_document(&second), text);
    }

    #[test]
    fn test_write_after_mutation() {
        let mut settings = Settings::open("[A]\n k = 1\n[/A]").unwrap();
        settings.add_sub_group("/A/", "B").unwrap();
        settings.get_group_mut("/A/B/").unwrap().add_key("flag", false).unwrap();
        settings.get_group_mut("/A/").unwrap().change_value("k", "one").unwrap();
        assert_eq!(
            settings.serialize(),
            "[A]\n    k = \"one\"\n    [B]\n        flag = false\n    [/B]\n[/A]\n"
        );
    }

    #[test]
    fn test_empty_store_writes_nothing() {
        assert_eq!(write_document(&Store::new()), "");
    }
}

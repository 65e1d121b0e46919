#[cfg(test)]
use super::*;

use std::io::Write;

const NESTED: &str = r#"
host = "local"
[A]
    [B]
        [C]
            leaf = 1
        [/C]
    [/B]
    [B2]
    [/B2]
[/A]
[D]
    d = 2
[/D]
[X]
[/X]
[AB]
[/AB]
"#;

fn settings(input: &str) -> Settings {
    Settings::open(input).expect("Failed to parse settings")
}

// ===== Facade =====

#[test]
fn test_end_to_end_example() {
    let input = r#"
host = "local"
[Net]
    port = 8080
    [Sub]
        ok = true
    [/Sub]
[/Net]
"#;
    let mut config = settings(input);

    assert_eq!(config.global("host").unwrap(), &Value::Text("local".into()));
    assert_eq!(config.global_keys().collect::<Vec<_>>(), vec!["host"]);

    let net = config.get_group("/Net/").unwrap();
    assert_eq!(net.read_value("port").unwrap(), &Value::Integer(8080));
    assert_eq!(net.read_int("port").unwrap(), 8080);

    assert!(config.get_group("/Net/Sub/").unwrap().read_boolean("ok").unwrap());
    assert_eq!(config.current_group().unwrap().path(), "/Net/Sub/");
}

#[test]
fn test_from_str_trait() {
    let config: Settings = "[A]\n[/A]".parse().unwrap();
    assert_eq!(config.child_groups().len(), 1);
    assert!(config.file().is_none());
}

#[test]
fn test_failed_parse_yields_no_document() {
    assert!(Settings::open("[A]\n x = 1\n").is_err());
}

#[test]
fn test_child_groups_are_top_level_only() {
    let config = settings(NESTED);
    let names: Vec<&str> = config.child_groups().into_iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["A", "D", "X", "AB"]);

    let subs: Vec<&str> = config.sub_groups("/A").unwrap().into_iter().map(|g| g.path()).collect();
    assert_eq!(subs, vec!["/A/B/", "/A/B2/"]);
    assert!(config.sub_groups("/Nope/").is_err());
}

// ===== Path resolution =====

#[test]
fn test_path_resolution_from_nested_group() {
    let mut config = settings(NESTED);
    config.get_group("/A/B/").unwrap();

    assert_eq!(config.navigator().resolve(config.store(), "C/").unwrap(), "/A/B/C/");
    assert_eq!(config.navigator().resolve(config.store(), "C").unwrap(), "/A/B/C/");
    assert_eq!(config.navigator().resolve(config.store(), "../").unwrap(), "/A/");
    assert_eq!(config.navigator().resolve(config.store(), "../B2").unwrap(), "/A/B2/");
    assert_eq!(config.navigator().resolve(config.store(), "../../D/").unwrap(), "/D/");
    assert_eq!(config.navigator().resolve(config.store(), "/X/").unwrap(), "/X/");
    assert_eq!(config.navigator().resolve(config.store(), "/X").unwrap(), "/X/");
}

#[test]
fn test_navigation_updates_current_group() {
    let mut config = settings(NESTED);
    assert!(config.current_group().is_none());

    assert_eq!(config.get_group("A").unwrap().path(), "/A/");
    assert_eq!(config.get_group("B").unwrap().path(), "/A/B/");
    assert_eq!(config.get_group("C/").unwrap().read_int("leaf").unwrap(), 1);
    assert_eq!(config.get_group("../../").unwrap().path(), "/A/");
    assert_eq!(config.get_group("/D/").unwrap().read_int("d").unwrap(), 2);
    assert_eq!(config.navigator().current(), "/D/");
}

#[test]
fn test_invalid_navigation_targets() {
    let mut config = settings(NESTED);

    assert!(matches!(config.get_group(""), Err(GcfError::PathError { code: Some(300), .. })));
    assert!(matches!(config.get_group("/"), Err(GcfError::PathError { code: Some(302), .. })));
    assert!(matches!(config.get_group("/Nope/"), Err(GcfError::PathError { code: Some(304), .. })));

    // walking up to the root or past it
    config.get_group("/A/").unwrap();
    assert!(matches!(config.get_group("../"), Err(GcfError::PathError { code: Some(302), .. })));
    assert!(matches!(config.get_group("../../"), Err(GcfError::PathError { code: Some(305), .. })));

    // failures leave the current group untouched
    assert_eq!(config.navigator().current(), "/A/");
}

#[test]
fn test_group_scoped_navigation_rejects_absolute_paths() {
    let mut config = settings(NESTED);
    config.get_group("/A/").unwrap();

    assert!(matches!(config.change_group("/D/"), Err(GcfError::PathError { code: Some(306), .. })));
    assert_eq!(config.change_group("B2").unwrap().path(), "/A/B2/");
    assert_eq!(config.change_group("../B/C").unwrap().path(), "/A/B/C/");
}

// ===== Store operations =====

#[test]
fn test_subtree_deletion_by_prefix() {
    let mut store = Parser::new(NESTED).unwrap().parse_document().unwrap();
    assert_eq!(store.len(), 7);

    let removed = store.delete_sub_group("/A/");
    assert_eq!(removed, 4);
    for gone in ["/A/", "/A/B/", "/A/B/C/", "/A/B2/"] {
        assert!(!store.contains_group(gone), "{gone} should be deleted");
    }
    // `/AB/` shares the text prefix `/A` but is not below `/A/`
    for kept in ["/D/", "/X/", "/AB/"] {
        assert!(store.contains_group(kept), "{kept} should remain");
    }
}

#[test]
fn test_idempotent_group_insert() {
    let mut store = Parser::new(NESTED).unwrap().parse_document().unwrap();
    let before = store.clone();

    let mut dup = Group::new("/A/", "B");
    dup.add_key("extra", 1).unwrap();
    assert!(!store.add_group(dup).unwrap());
    assert!(!store.add_top_group(Group::new("/", "D")));
    assert!(!store.add_global_key("host", Value::Integer(0)));

    assert_eq!(store, before);
    assert!(!store.group("/A/B/").unwrap().has_key("extra"));
}

#[test]
fn test_add_group_requires_existing_parent() {
    let mut store = Store::new();
    let err = store.add_group(Group::new("/Missing/", "Child")).unwrap_err();
    assert!(matches!(err, GcfError::PathError { ref path, code: Some(304), .. } if path == "/Missing/"));
    assert!(store.add_group(Group::new("/", "Top")).unwrap());
}

#[test]
fn test_root_is_not_a_deletable_subtree() {
    let mut store = Parser::new(NESTED).unwrap().parse_document().unwrap();
    assert_eq!(store.delete_sub_group(ROOT_PATH), 0);
    assert_eq!(store.delete_sub_group(""), 0);
    assert_eq!(store.len(), 7);
}

#[test]
fn test_emptiness_counts_groups_only() {
    let mut store = Store::new();
    store.add_global_key("host", Value::from("local"));
    assert_eq!(store.len(), 0);
    assert!(store.is_empty());

    store.add_top_group(Group::new("/", "A"));
    assert_eq!(store.len(), 1);
    assert!(!store.is_empty());
}

// ===== Sub-group mutation through the facade =====

#[test]
fn test_add_and_delete_sub_groups() {
    let mut config = settings(NESTED);

    config.add_sub_group("/D/", "E").unwrap();
    config.add_sub_group("/D/E", "F").unwrap();
    config.add_top_group("Z").unwrap();
    // second insert is a no-op
    config.add_sub_group("/D/", "E").unwrap();

    let d_children: Vec<&str> = config.sub_groups("/D/").unwrap().into_iter().map(|g| g.name()).collect();
    assert_eq!(d_children, vec!["E"]);
    assert_eq!(config.get_group("/D/E/F/").unwrap().parent(), "/D/E/");

    config.delete_sub_group("/D/", "E").unwrap();
    assert!(config.get_group("/D/E/F/").is_err());
    assert!(config.get_group("/D/").is_ok());

    config.delete_top_group("Z").unwrap();
    let names: Vec<&str> = config.child_groups().into_iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["A", "D", "X", "AB"]);
}

#[test]
fn test_delete_unknown_sub_group_fails() {
    let mut config = settings(NESTED);
    let err = config.delete_sub_group("/D/", "Nope").unwrap_err();
    assert!(matches!(err, GcfError::PathError { code: Some(308), .. }));
}

#[test]
fn test_delete_sub_group_only_reaches_direct_children() {
    let mut config = settings(NESTED);
    assert!(matches!(
        config.delete_sub_group("/", "A/B"),
        Err(GcfError::ValidationError { code: Some(451), .. })
    ));
    assert!(matches!(config.delete_sub_group("/A/", "../D"), Err(GcfError::ValidationError { .. })));
    assert!(config.get_group("/A/B/C/").is_ok());
    assert!(config.get_group("/D/").is_ok());
}

#[test]
fn test_add_sub_group_validation() {
    let mut config = settings(NESTED);
    assert!(matches!(
        config.add_sub_group("/D/", "bad name"),
        Err(GcfError::ValidationError { code: Some(451), .. })
    ));
    assert!(matches!(config.add_sub_group("/Nope/", "E"), Err(GcfError::PathError { .. })));
}

#[test]
fn test_deleting_current_group_resets_navigation() {
    let mut config = settings(NESTED);
    config.get_group("/A/B/C/").unwrap();
    config.delete_top_group("A").unwrap();

    assert_eq!(config.navigator().current(), ROOT_PATH);
    assert_eq!(config.get_group("D").unwrap().path(), "/D/");
}

// ===== Group key operations =====

#[test]
fn test_key_operations() {
    let mut config = settings("[G]\n a = 1\n[/G]");
    let group = config.get_group_mut("/G/").unwrap();

    group.add_key("b", "text").unwrap();
    group.add_key("a", 99).unwrap();
    assert_eq!(group.read_int("a").unwrap(), 1);

    group.change_value("a", 2.5).unwrap();
    assert_eq!(group.read_value("a").unwrap(), &Value::Float(2.5));
    assert!(matches!(
        group.change_value("missing", 1),
        Err(GcfError::KeyNotFound { code: Some(321), .. })
    ));

    assert!(group.delete_key("b"));
    assert!(!group.delete_key("b"));
    assert_eq!(group.child_keys().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_key_validation() {
    let mut group = Group::new("/", "G");
    assert!(matches!(group.add_key("1abc", 1), Err(GcfError::ValidationError { code: Some(450), .. })));
    assert!(matches!(group.add_key("a-b", 1), Err(GcfError::ValidationError { .. })));
    assert!(matches!(
        group.add_key("quote", "say \"hi\""),
        Err(GcfError::ValidationError { code: Some(452), .. })
    ));
    group.add_key("ok", "fine").unwrap();
    assert!(matches!(group.change_value("ok", "two\nlines"), Err(GcfError::ValidationError { .. })));
    assert_eq!(group.read_string("ok").unwrap(), "fine");
}

#[test]
fn test_values_that_cannot_be_reread_are_rejected() {
    let mut config = settings("[G]\n a = 1.5\n[/G]");
    let group = config.get_group_mut("/G/").unwrap();

    assert!(matches!(group.change_value("a", f64::NAN), Err(GcfError::ValidationError { code: Some(453), .. })));
    assert!(matches!(group.add_key("b", f64::INFINITY), Err(GcfError::ValidationError { code: Some(453), .. })));
    assert!(matches!(group.add_key("c", f64::NEG_INFINITY), Err(GcfError::ValidationError { .. })));
    assert!(matches!(group.add_key("s", "  padded "), Err(GcfError::ValidationError { code: Some(454), .. })));
    assert!(matches!(group.change_value("a", "tail\t"), Err(GcfError::ValidationError { code: Some(454), .. })));
    group.add_key("inner", "in ner").unwrap();

    let reread = settings(&config.serialize());
    assert_eq!(reread.store(), config.store());
    assert_eq!(reread.store().group("/G/").unwrap().read_double("a").unwrap(), 1.5);
    assert!(!reread.store().group("/G/").unwrap().has_key("b"));
}

// ===== Typed readers =====

#[test]
fn test_typed_readers_rederive_from_text() {
    let input = r#"
[T]
    int = 42
    long = 9000000000
    float = 12.48
    whole = 3.0
    yes = TRUE
    numtext = "17"
    booltext = "False"
    name = "gcf"
[/T]
"#;
    let mut config = settings(input);
    let t = config.get_group("/T/").unwrap();

    assert_eq!(t.read_int("int").unwrap(), 42);
    assert_eq!(t.read_short("int").unwrap(), 42);
    assert_eq!(t.read_long("long").unwrap(), 9_000_000_000);
    assert_eq!(t.read_double("int").unwrap(), 42.0);
    assert_eq!(t.read_double("float").unwrap(), 12.48);
    assert_eq!(t.read_float("float").unwrap(), 12.48f32);
    assert!(t.read_boolean("yes").unwrap());

    // text is re-read regardless of the stored variant
    assert_eq!(t.read_int("numtext").unwrap(), 17);
    assert!(!t.read_boolean("booltext").unwrap());
    let n: i64 = t.read("numtext").unwrap();
    assert_eq!(n, 17);
}

#[test]
fn test_typed_readers_fail_fast() {
    let input = "[T]\n long = 9000000000\n whole = 3.0\n name = \"gcf\"\n flag = true\n[/T]";
    let mut config = settings(input);
    let t = config.get_group("/T/").unwrap();

    assert!(matches!(t.read_int("long"), Err(GcfError::ConversionError { code: Some(402), .. })));
    assert!(matches!(t.read_short("long"), Err(GcfError::ConversionError { .. })));
    assert!(matches!(t.read_int("whole"), Err(GcfError::ConversionError { .. })));
    assert!(matches!(t.read_double("name"), Err(GcfError::ConversionError { .. })));
    assert!(matches!(t.read_int("flag"), Err(GcfError::ConversionError { .. })));
    assert!(matches!(t.read_boolean("name"), Err(GcfError::ConversionError { code: Some(403), .. })));
    assert!(matches!(t.read_int("missing"), Err(GcfError::KeyNotFound { code: Some(320), .. })));
}

#[test]
fn test_string_reader_accepts_any_value() {
    let mut config = settings("[T]\n n = 8080\n f = 0.5\n b = false\n s = \"x\"\n[/T]");
    let t = config.get_group("/T/").unwrap();

    assert_eq!(t.read_string("n").unwrap(), "8080");
    assert_eq!(t.read_string("f").unwrap(), "0.5");
    assert_eq!(t.read_string("b").unwrap(), "false");
    assert_eq!(t.read_string("s").unwrap(), "x");
    assert!(t.read_string("missing").is_err());
}

// ===== Files =====

#[test]
fn test_from_file_and_save() {
    let mut file = tempfile::Builder::new().suffix(".gcf").tempfile().unwrap();
    file.write_all(b"# settings\nname = \"app\"\n[Net]\n port = 1\n[/Net]\n").unwrap();

    let mut config = Settings::from_file(file.path()).unwrap();
    assert_eq!(config.file(), Some(file.path()));

    config.get_group_mut("/Net/").unwrap().change_value("port", 2).unwrap();
    config.save().unwrap();

    let written = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(written, "name = \"app\"\n[Net]\n    port = 2\n[/Net]\n");

    let mut reloaded = Settings::from_file(file.path()).unwrap();
    assert_eq!(reloaded.get_group("/Net/").unwrap().read_int("port").unwrap(), 2);
}

#[test]
fn test_save_to_other_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("copy.GCF");

    let config = settings(NESTED);
    config.save_to_file(&target).unwrap();

    let copy = Settings::from_file(&target).unwrap();
    assert_eq!(copy.store(), config.store());
}

#[test]
fn test_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let wrong_ext = dir.path().join("settings.txt");
    std::fs::write(&wrong_ext, "[A]\n[/A]").unwrap();
    assert!(matches!(
        Settings::from_file(&wrong_ext),
        Err(GcfError::FileError { code: Some(310), .. })
    ));

    let missing = dir.path().join("missing.gcf");
    match Settings::from_file(&missing) {
        Err(GcfError::FileError { path, code: Some(311), .. }) => {
            assert!(path.ends_with("missing.gcf"));
        }
        other => panic!("expected file error, got {other:?}"),
    }

    assert!(matches!(settings("").save(), Err(GcfError::FileError { code: Some(313), .. })));

    let unwritable = dir.path().join("no_such_dir").join("out.gcf");
    assert!(matches!(
        settings("").save_to_file(&unwritable),
        Err(GcfError::FileError { code: Some(312), .. })
    ));
}

#[test]
fn test_json_export_from_settings() {
    let json = settings(NESTED).to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["groups"]["A"]["groups"]["B"]["groups"]["C"]["keys"]["leaf"], 1);
}

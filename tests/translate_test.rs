use localizer::{Localizer, LocalizerConfig, TranslationOptions};

fn opts() -> TranslationOptions {
    TranslationOptions::new()
}

fn en_fr() -> Localizer {
    let mut localizer = Localizer::default();
    localizer.load_translations(
        "en",
        [
            ("greeting", "Hello"),
            ("welcome", "Welcome, ${name}!"),
            ("items_one", "You have ${count} item."),
            ("items_other", "You have ${count} items."),
            ("nested.key", "Nested key"),
        ],
    );
    localizer.load_translations(
        "fr",
        [
            ("greeting", "Bonjour"),
            ("welcome", "Bienvenue, ${name}!"),
            ("items_one", "Vous avez ${count} article."),
            ("items_other", "Vous avez ${count} articles."),
            ("nested.key", "Clé imbriquée"),
        ],
    );
    localizer
}

#[test]
fn test_load_translations_merges() {
    let mut localizer = Localizer::default();
    localizer.load_translations("en", [("a", "1")]);
    localizer.load_translations("en", [("b", "2")]);
    assert_eq!(localizer.translate("a", &opts()), "1");
    assert_eq!(localizer.translate("b", &opts()), "2");

    localizer.load_translations("en", [("a", "3")]);
    assert_eq!(localizer.translate("a", &opts()), "3");
    assert_eq!(localizer.available_languages(), vec!["en"]);
}

#[test]
fn test_set_language() {
    let mut localizer = en_fr();
    localizer.set_language("fr");
    assert_eq!(localizer.language(), "fr");
    assert_eq!(localizer.translate("greeting", &opts()), "Bonjour");
}

#[test]
fn test_unavailable_language_falls_back() {
    let mut localizer = en_fr();
    localizer.set_language("fr");
    localizer.set_language("de");
    assert_eq!(localizer.language(), "en");
    assert_eq!(localizer.translate("greeting", &opts()), "Hello");
}

#[test]
fn test_unloaded_fallback_can_be_selected() {
    let mut localizer = Localizer::new(LocalizerConfig {
        fallback_language: "pt".to_string(),
        default_language: "pt".to_string(),
        ..LocalizerConfig::default()
    });
    localizer.load_translations("es", [("greeting", "Hola")]);
    localizer.set_language("es");
    localizer.set_language("pt");
    assert_eq!(localizer.language(), "pt");
    assert_eq!(localizer.available_languages(), vec!["es"]);
    assert_eq!(localizer.translate("greeting", &opts()), "greeting");
}

#[test]
fn test_simple_and_nested_keys() {
    let localizer = en_fr();
    assert_eq!(localizer.translate("greeting", &opts()), "Hello");
    assert_eq!(localizer.translate("nested.key", &opts()), "Nested key");
}

#[test]
fn test_missing_key_returns_key() {
    let localizer = en_fr();
    assert_eq!(localizer.translate("missing.key", &opts()), "missing.key");
    // 键本身不做插值
    assert_eq!(
        localizer.translate("hi ${name}", &opts().with("name", "Ada")),
        "hi ${name}"
    );
}

#[test]
fn test_language_override_does_not_change_current() {
    let localizer = en_fr();
    assert_eq!(localizer.translate("greeting", &opts().language("fr")), "Bonjour");
    assert_eq!(localizer.language(), "en");
}

#[test]
fn test_language_override_falls_back_per_key() {
    let mut localizer = en_fr();
    localizer.load_translations("en", [("only_en", "English only")]);
    assert_eq!(
        localizer.translate("only_en", &opts().language("fr")),
        "English only"
    );
    assert_eq!(
        localizer.translate("greeting", &opts().language("xx")),
        "Hello"
    );
}

#[test]
fn test_interpolation() {
    let localizer = en_fr();
    assert_eq!(
        localizer.translate("welcome", &opts().with("name", "John")),
        "Welcome, John!"
    );
    assert_eq!(localizer.translate("welcome", &opts()), "Welcome, ${name}!");
}

#[test]
fn test_interpolation_value_types() {
    let mut localizer = Localizer::default();
    localizer.load_translations("en", [("stats", "${n} / ${ratio} / ${ok}")]);
    let options = opts().with("n", 3).with("ratio", 0.25).with("ok", false);
    assert_eq!(localizer.translate("stats", &options), "3 / 0.25 / false");
}

#[test]
fn test_pluralization() {
    let mut localizer = Localizer::default();
    localizer.load_translations(
        "en",
        [("items_one", "1 item"), ("items_other", "${count} items")],
    );
    assert_eq!(localizer.translate("items", &opts().count(1)), "1 item");
    assert_eq!(localizer.translate("items", &opts().count(0)), "0 items");
    assert_eq!(localizer.translate("items", &opts().count(-3)), "-3 items");
    assert_eq!(localizer.translate("items", &opts().count(5)), "5 items");
}

#[test]
fn test_pluralization_per_language() {
    let localizer = en_fr();
    assert_eq!(localizer.translate("items", &opts().count(1)), "You have 1 item.");
    assert_eq!(
        localizer.translate("items", &opts().count(5).language("fr")),
        "Vous avez 5 articles."
    );
}

#[test]
fn test_plural_form_overrides_base_key() {
    let mut localizer = Localizer::default();
    localizer.load_translations(
        "en",
        [("files", "some files"), ("files_other", "${count} files")],
    );
    assert_eq!(localizer.translate("files", &opts().count(2)), "2 files");
    // 没有 files_one，使用基础键，count 仍可插值
    assert_eq!(localizer.translate("files", &opts().count(1)), "some files");
    assert_eq!(localizer.translate("files", &opts()), "some files");
}

#[test]
fn test_count_passes_through_without_plural_forms() {
    let mut localizer = Localizer::default();
    localizer.load_translations("en", [("apples", "${count} apple(s)")]);
    assert_eq!(localizer.translate("apples", &opts().count(1)), "1 apple(s)");
}

#[test]
fn test_plural_form_from_fallback_language() {
    let mut localizer = Localizer::default();
    localizer.load_translations("en", [("items_other", "${count} items")]);
    localizer.load_translations("fr", [("items", "des articles")]);
    localizer.set_language("fr");
    assert_eq!(localizer.translate("items", &opts().count(4)), "4 items");
    assert_eq!(localizer.translate("items", &opts()), "des articles");
}

#[test]
fn test_zero_suffix_is_not_consulted() {
    let mut localizer = Localizer::default();
    localizer.load_translations(
        "en",
        [
            ("items_zero", "No items"),
            ("items_one", "1 item"),
            ("items_other", "${count} items"),
        ],
    );
    assert_eq!(localizer.translate("items", &opts().count(0)), "0 items");
    assert_eq!(localizer.translate("items_zero", &opts()), "No items");
}

#[test]
fn test_missing_plural_and_base_returns_key() {
    let localizer = Localizer::default();
    assert_eq!(localizer.translate("items", &opts().count(2)), "items");
}

#[test]
fn test_custom_delimiters() {
    let mut localizer = Localizer::new(LocalizerConfig {
        interpolation_start: "{{".to_string(),
        interpolation_end: "}}".to_string(),
        ..LocalizerConfig::default()
    });
    localizer.load_translations(
        "en",
        [("welcome", "Hi {{name}}"), ("legacy", "Hi ${name}")],
    );
    localizer.set_language("en");

    let options = opts().with("name", "Sam");
    assert_eq!(localizer.translate("welcome", &options), "Hi Sam");
    assert_eq!(localizer.translate("legacy", &options), "Hi ${name}");
}

#[test]
fn test_custom_default_and_fallback() {
    let mut localizer = Localizer::new(LocalizerConfig {
        default_language: "fr".to_string(),
        fallback_language: "fr".to_string(),
        ..LocalizerConfig::default()
    });
    localizer.load_translations("fr", [("greeting", "Bonjour")]);
    assert_eq!(localizer.language(), "fr");
    assert_eq!(localizer.translate("greeting", &opts()), "Bonjour");
}

#[test]
fn test_rtl() {
    let mut localizer = en_fr();
    localizer.load_translations("he", [("greeting", "שלום")]);
    assert!(!localizer.is_rtl());
    assert!(localizer.is_language_rtl("ar"));
    assert!(localizer.is_language_rtl("ur"));
    assert!(!localizer.is_language_rtl("fr"));

    localizer.set_language("he");
    assert!(localizer.is_rtl());

    let custom = Localizer::new(LocalizerConfig {
        rtl_languages: vec!["yi".to_string()],
        ..LocalizerConfig::default()
    });
    assert!(custom.is_language_rtl("yi"));
    assert!(!custom.is_language_rtl("ar"));
}

#[test]
fn test_greeting_scenario() {
    let mut localizer = Localizer::default();
    localizer.load_translations("en", [("greeting", "Hello, ${name}!")]);
    assert_eq!(
        localizer.translate("greeting", &opts().with("name", "Ada")),
        "Hello, Ada!"
    );
}

#[test]
fn test_two_language_scenario() {
    let mut localizer = Localizer::default();
    localizer.load_translations("en", [("x", "a")]);
    localizer.load_translations("fr", [("x", "b")]);
    localizer.set_language("fr");
    assert_eq!(localizer.translate("x", &opts()), "b");
    assert_eq!(localizer.translate("x", &opts().language("en")), "a");
}

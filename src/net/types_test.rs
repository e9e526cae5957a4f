use super::*;

fn record(display_name: Option<&str>, photo_url: Option<&str>) -> ProviderUser {
    ProviderUser {
        local_id: "uid-1".to_owned(),
        email: "ada@example.com".to_owned(),
        display_name: display_name.map(str::to_owned),
        photo_url: photo_url.map(str::to_owned),
        email_verified: Some(true),
    }
}

// =============================================================
// to_user
// =============================================================

#[test]
fn to_user_renames_fields() {
    let user = to_user(&record(Some("Ada"), Some("https://img.example/ada.png")));
    assert_eq!(user.id, "uid-1");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.display_name.as_deref(), Some("Ada"));
    assert_eq!(user.photo_url.as_deref(), Some("https://img.example/ada.png"));
    assert_eq!(user.email_verified, Some(true));
}

#[test]
fn to_user_null_profile_fields_become_absent() {
    let user = to_user(&record(None, None));
    assert!(user.display_name.is_none());
    assert!(user.photo_url.is_none());
}

#[test]
fn to_user_empty_profile_fields_become_absent() {
    let user = to_user(&record(Some(""), Some("")));
    assert!(user.display_name.is_none());
    assert!(user.photo_url.is_none());
}

#[test]
fn to_user_is_idempotent_when_refed() {
    let once = to_user(&record(Some("Ada"), None));
    let twice = to_user(&ProviderUser::from(&once));
    assert_eq!(once, twice);
}

// =============================================================
// Wire shape
// =============================================================

#[test]
fn provider_user_parses_json_nulls() {
    let json = r#"{"localId":"u9","email":"x@y.z","displayName":null,"photoUrl":null}"#;
    let parsed: ProviderUser = serde_json::from_str(json).unwrap();
    let user = to_user(&parsed);
    assert_eq!(user.id, "u9");
    assert!(user.display_name.is_none());
    assert!(user.email_verified.is_none());
}

#[test]
fn provider_user_tolerates_missing_optional_fields() {
    let json = r#"{"localId":"u9","email":"x@y.z","idToken":"tok"}"#;
    let parsed: ProviderUser = serde_json::from_str(json).unwrap();
    assert!(parsed.photo_url.is_none());
}

#[test]
fn user_serialization_omits_absent_fields() {
    let user = to_user(&record(None, None));
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("display_name").is_none());
    assert!(json.get("photo_url").is_none());
}

#[test]
fn label_prefers_display_name() {
    assert_eq!(to_user(&record(Some("Ada"), None)).label(), "Ada");
    assert_eq!(to_user(&record(None, None)).label(), "ada@example.com");
}

#[test]
fn initials_take_one_letter_per_local_part_segment() {
    let mut user = to_user(&record(None, None));
    assert_eq!(user.initials().as_deref(), Some("A"));

    user.email = "grace.brewster.hopper@navy.mil".to_owned();
    assert_eq!(user.initials().as_deref(), Some("GB"));
}

#[test]
fn initials_absent_without_email() {
    let mut user = to_user(&record(Some("Ada"), None));
    user.email = String::new();
    assert_eq!(user.initials(), None);
}

use crm_backend::util::password::*;

#[test]
fn test_hash_password_success() {
    let password = "test_password_123";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
    assert!(hash.starts_with("$argon2"));

    let parts: Vec<&str> = hash.split('$').collect();
    assert!(parts.len() >= 5, "Hash should have at least 5 parts separated by $");
}

#[test]
fn test_hash_password_different_results() {
    let password = "same_password";

    let hash1 = PasswordUtilsImpl::hash_password(password).unwrap();
    let hash2 = PasswordUtilsImpl::hash_password(password).unwrap();

    // Same password should produce different hashes due to random salt
    assert_ne!(hash1, hash2);
}

#[test]
fn test_verify_password_success() {
    let password = "CorrectHorse9!";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_password_wrong_password() {
    let hash = PasswordUtilsImpl::hash_password("CorrectHorse9!").unwrap();

    assert!(!PasswordUtilsImpl::verify_password("WrongHorse9!", &hash).unwrap());
}

#[test]
fn test_verify_password_invalid_hash_format() {
    let result = PasswordUtilsImpl::verify_password("whatever", "not-a-valid-hash");
    assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
}

#[test]
fn test_hash_password_unicode() {
    let password = "Pässw0rd123!🔒";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();
    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
}

#[test]
fn test_constant_time_eq_behaves_as_equality() {
    assert!(constant_time_eq("admin-code-2026", "admin-code-2026"));
    assert!(!constant_time_eq("admin-code-2026", "admin-code-2027"));
    assert!(!constant_time_eq("admin-code-2026", ""));
}

use crm_backend::config::JwtConfig;
use crm_backend::util::jwt::*;

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

struct TestUser {
    id: String,
    email: String,
    role: String,
}

impl TestUser {
    fn new_user() -> Self {
        Self {
            id: "64b8f0f4a2d3c45f9e8b4567".to_string(),
            email: "user@example.com".to_string(),
            role: "user".to_string(),
        }
    }

    fn new_admin() -> Self {
        Self {
            id: "64b8f0f4a2d3c45f9e8b4568".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        }
    }
}

#[test]
fn test_generate_access_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let token = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();
    assert!(!token.is_empty());

    let claims = jwt_utils.validate_access_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, user.role);
    assert_eq!(claims.token_type, "access");
}

#[test]
fn test_generate_refresh_token_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_admin();

    let token = jwt_utils
        .generate_refresh_token(&user.id, &user.email, &user.role)
        .unwrap();

    let claims = jwt_utils.validate_refresh_token(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.role, "admin");
    assert_eq!(claims.token_type, "refresh");
}

#[test]
fn test_generate_token_pair_success() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let pair = jwt_utils
        .generate_token_pair(&user.id, &user.email, &user.role)
        .unwrap();
    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_eq!(
        pair.expires_in,
        jwt_utils.jwt_config.access_token_expiration * 60
    );
    assert_eq!(pair.token_type, "Bearer");

    assert!(jwt_utils.validate_access_token(&pair.access_token).is_ok());
    assert!(jwt_utils
        .validate_refresh_token(&pair.refresh_token)
        .is_ok());
}

#[test]
fn test_access_token_is_not_a_valid_refresh_token() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let access = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();

    let result = jwt_utils.validate_refresh_token(&access);
    assert!(matches!(result, Err(JwtError::InvalidTokenType { .. })));
}

#[test]
fn test_validate_token_rejects_wrong_secret() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();
    let token = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();

    let mut other_config = JwtConfig::default();
    other_config.jwt_secret = "a_completely_different_secret_key_of_enough_length".to_string();
    let other_utils = JwtTokenUtilsImpl::new(other_config);

    assert!(other_utils.validate_access_token(&token).is_err());
}

#[test]
fn test_validate_token_rejects_garbage() {
    let jwt_utils = create_test_jwt_utils();
    assert!(jwt_utils.validate_access_token("not.a.token").is_err());
    assert!(jwt_utils.validate_access_token("").is_err());
}

#[test]
fn test_extract_token_from_header() {
    let jwt_utils = create_test_jwt_utils();

    let token = jwt_utils
        .extract_token_from_header("Bearer abc.def.ghi")
        .unwrap();
    assert_eq!(token, "abc.def.ghi");

    assert!(jwt_utils.extract_token_from_header("abc.def.ghi").is_err());
    assert!(jwt_utils.extract_token_from_header("Bearer ").is_err());
    assert!(jwt_utils.extract_token_from_header("Basic abc").is_err());
}

#[test]
fn test_tokens_have_unique_jti() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let t1 = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();
    let t2 = jwt_utils
        .generate_access_token(&user.id, &user.email, &user.role)
        .unwrap();

    let c1 = jwt_utils.validate_access_token(&t1).unwrap();
    let c2 = jwt_utils.validate_access_token(&t2).unwrap();
    assert_ne!(c1.jti, c2.jti);
}

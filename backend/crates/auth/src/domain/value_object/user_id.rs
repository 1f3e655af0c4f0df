use kernel::id::{Id, markers};

/// Store-assigned user identifier
pub type UserId = Id<markers::User>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::app_id::AppId;

    #[test]
    fn test_user_id_from_raw() {
        let user_id = UserId::new(17);
        assert_eq!(user_id.get(), 17);
        assert!(!user_id.is_unset());
    }

    #[test]
    fn test_zero_is_unset() {
        assert!(UserId::new(0).is_unset());
        assert!(AppId::new(0).is_unset());
    }
}

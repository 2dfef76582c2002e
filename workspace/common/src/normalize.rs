/// Canonical form of a lookup field (role name, e-mail, user name).
///
/// The store keeps this projection next to the source value so lookups can
/// compare normalized columns directly instead of folding case in SQL.
pub fn normalize(value: &str) -> String {
    value.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ascii() {
        assert_eq!(normalize("GalloJunior"), "GALLOJUNIOR");
        assert_eq!(normalize("gallojunior@gmail.com"), "GALLOJUNIOR@GMAIL.COM");
    }

    #[test]
    fn test_normalize_accented() {
        assert_eq!(normalize("Usuário"), "USUÁRIO");
        assert_eq!(normalize("Administrador"), "ADMINISTRADOR");
    }

    #[test]
    fn test_normalize_keeps_whitespace() {
        assert_eq!(normalize(" admin "), " ADMIN ");
    }
}

use axum::response::Html;

use crate::config::IntakeMode;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// GET /
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Login form. Simple mode has a single admin, so only the password is asked.
pub fn login_page(mode: IntakeMode) -> String {
    let username_input = match mode {
        IntakeMode::Vendor => {
            "<input type=\"text\" name=\"username\" placeholder=\"Vendor name or OWNER\"><br><br>\n"
        }
        IntakeMode::Simple => "",
    };
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Admin Login</title></head>\n\
         <body style=\"font-family:Arial\">\n<h2>Admin Login</h2>\n<form method=\"post\">\n\
         {username_input}<input type=\"password\" name=\"password\" placeholder=\"Password\"><br><br>\n\
         <button type=\"submit\">Login</button>\n</form>\n</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_fields_follow_mode() {
        let vendor = login_page(IntakeMode::Vendor);
        assert!(vendor.contains("name=\"username\""));
        assert!(vendor.contains("name=\"password\""));

        let simple = login_page(IntakeMode::Simple);
        assert!(!simple.contains("name=\"username\""));
        assert!(simple.contains("name=\"password\""));
    }

    #[test]
    fn test_index_page_drives_chat_and_upload() {
        assert!(INDEX_HTML.contains("fetch(\"/chat\""));
        assert!(INDEX_HTML.contains("fetch(\"/upload\""));
    }
}

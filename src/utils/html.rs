use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based sanitization: safe tags (like <b>, <p>) survive while
/// dangerous tags (like <script>, <iframe>) and malicious attributes (like
/// onclick) are stripped. Article bodies are rendered unescaped on the
/// single-article view, so this is the fail-safe against stored XSS.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

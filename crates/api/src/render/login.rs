use super::page_shell;

/// Sign-in page with a single provider link.
pub fn render_login() -> String {
    page_shell(
        "Sign in",
        r#"<main class="login">
<h1>Sign in</h1>
<p>Connect your Google Calendar to see upcoming assignments.</p>
<a class="button" href="/api/auth/signin">Sign in with Google</a>
</main>"#,
    )
}

use crate::ui::Component;

const FOOTER: &str = r#"<footer class="footer">
  <div class="footer-inner">
    <span>Target: B1 Proficiency in 30 Days</span>
  </div>
</footer>"#;

/// Full page body: navbar, the active view's region, footer.
pub struct AppLayout<'a> {
    pub navbar: &'a dyn Component,
    pub main: &'a dyn Component,
}

impl<'a> AppLayout<'a> {
    pub fn new(navbar: &'a dyn Component, main: &'a dyn Component) -> Self {
        Self { navbar, main }
    }
}

impl Component for AppLayout<'_> {
    fn render(&self) -> String {
        format!(
            "{navbar}\n<main class=\"main\">\n{main}\n</main>\n{FOOTER}",
            navbar = self.navbar.render(),
            main = self.main.render(),
        )
    }
}

use crate::event::Action;
use crate::ui::{Component, action_attrs};

pub struct Navbar {
    pub xp: u32,
}

impl Navbar {
    pub fn new(xp: u32) -> Self {
        Self { xp }
    }
}

impl Component for Navbar {
    fn render(&self) -> String {
        format!(
            r#"<nav class="navbar">
  <div class="navbar-inner">
    <div class="brand"{home}>
      <span class="brand-icon">&gt;_</span>
      <span class="brand-name">DEV<span class="brand-accent">ENGLISH</span></span>
    </div>
    <div class="navbar-stats">
      <span class="xp-badge" data-xp="{xp}">{xp} XP</span>
      <div class="avatar"></div>
    </div>
  </div>
</nav>"#,
            home = action_attrs(&Action::GoDashboard),
            xp = self.xp,
        )
    }
}

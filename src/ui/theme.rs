use fltk::app;

/// Base look of the application: a warm light background over the GTK scheme
/// picked at startup.
pub fn apply_theme() {
    app::background(246, 245, 244);
    app::background2(255, 255, 255);
    app::foreground(46, 52, 54);
    app::set_visible_focus(false);
}

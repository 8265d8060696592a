use fltk::{
    app::Sender,
    button::ToggleButton,
    enums::{Align, Color, FrameType},
    group::{Scroll, ScrollType},
    image::SharedImage,
    prelude::*,
};

use crate::app::messages::Message;
use crate::pdf::render::ThumbnailStore;
use crate::pdf::{Document, Page};

const TILE_GAP: i32 = 16;
const LABEL_STRIP: i32 = 24;

/// The scrollable grid of page tiles. Each tile is a toggle button; its
/// toggle state is the selection state of that page.
pub struct PageView {
    pub scroll: Scroll,
    tiles: Vec<ToggleButton>,
    tile_size: i32,
    sender: Sender<Message>,
}

impl PageView {
    pub fn new(x: i32, y: i32, w: i32, h: i32, tile_size: i32, sender: Sender<Message>) -> Self {
        let mut scroll = Scroll::new(x, y, w, h, None);
        scroll.set_type(ScrollType::Vertical);
        scroll.set_color(Color::from_rgb(222, 221, 218));
        scroll.end();
        scroll.hide();

        Self {
            scroll,
            tiles: Vec::new(),
            tile_size,
            sender,
        }
    }

    pub fn set_zoom(&mut self, tile_size: i32) {
        self.tile_size = tile_size;
    }

    /// Throw away the tiles and rebuild them from the document, restoring the
    /// given selection.
    pub fn rebuild(&mut self, document: &Document, thumbs: Option<&ThumbnailStore>, selected: &[usize]) {
        self.tiles.clear();
        self.scroll.clear();

        let (tile_w, tile_h) = self.tile_dimensions();
        self.scroll.begin();
        for (index, page) in document.pages().iter().enumerate() {
            let mut tile = ToggleButton::new(0, 0, tile_w, tile_h, None);
            tile.set_frame(FrameType::UpBox);
            tile.set_down_frame(FrameType::DownBox);
            tile.set_align(Align::Inside | Align::Bottom | Align::Clip);
            tile.set_label(&tile_label(page));
            tile.set_label_size(12);
            tile.set_selection_color(Color::from_rgb(153, 193, 241));
            tile.set_tooltip(&format!("Page {} of the source document", page.number));

            if let Some(store) = thumbs {
                if let Some(path) = store.path(page.number) {
                    if let Ok(mut image) = SharedImage::load(path) {
                        image.scale(tile_w - 12, tile_h - LABEL_STRIP - 12, true, true);
                        tile.set_image(Some(image));
                    }
                }
            }

            if selected.contains(&index) {
                tile.set_value(true);
            }

            let sender = self.sender;
            tile.set_callback(move |_| sender.send(Message::SelectionChanged));

            self.tiles.push(tile);
        }
        self.scroll.end();

        self.relayout();
    }

    /// Update tile labels in place (rotation badges) without touching the
    /// widget tree or the selection.
    pub fn refresh_labels(&mut self, document: &Document) {
        for (tile, page) in self.tiles.iter_mut().zip(document.pages()) {
            tile.set_label(&tile_label(page));
        }
        self.scroll.redraw();
    }

    /// Flow the tiles into as many columns as the current width allows.
    pub fn relayout(&mut self) {
        if self.tiles.is_empty() {
            self.scroll.redraw();
            return;
        }

        self.scroll.scroll_to(0, 0);
        let (tile_w, tile_h) = self.tile_dimensions();
        let usable = self.scroll.w() - TILE_GAP - 18;
        let columns = (usable / (tile_w + TILE_GAP)).max(1);

        for (index, tile) in self.tiles.iter_mut().enumerate() {
            let row = index as i32 / columns;
            let col = index as i32 % columns;
            tile.resize(
                self.scroll.x() + TILE_GAP + col * (tile_w + TILE_GAP),
                self.scroll.y() + TILE_GAP + row * (tile_h + TILE_GAP),
                tile_w,
                tile_h,
            );
        }
        self.scroll.redraw();
    }

    pub fn selected_indexes(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.value())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn clear_selection(&mut self) {
        for tile in &mut self.tiles {
            tile.set_value(false);
        }
        self.scroll.redraw();
    }

    fn tile_dimensions(&self) -> (i32, i32) {
        (self.tile_size, self.tile_size * 13 / 10 + LABEL_STRIP)
    }
}

fn tile_label(page: &Page) -> String {
    if page.rotation == 0 {
        format!("Page {}", page.number)
    } else {
        format!("Page {} ({}\u{00b0})", page.number, page.rotation)
    }
}

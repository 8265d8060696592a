/// Enabled/disabled state of every user-facing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionStates {
    pub open: bool,
    pub save: bool,
    pub undo: bool,
    pub redo: bool,
    pub remove_selected: bool,
    pub remove_unselected: bool,
    pub remove_previous: bool,
    pub remove_next: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub cancel_selection: bool,
    pub preview: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

/// Inputs the action matrix is computed from. `page_count` is `None` while no
/// document is open.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub page_count: Option<usize>,
    pub selected: &'a [usize],
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub saving: bool,
}

impl ActionStates {
    pub fn compute(ctx: &ActionContext) -> Self {
        // A running save disables everything, including opening another file.
        if ctx.saving {
            return Self::default();
        }

        let mut states = Self {
            open: true,
            ..Self::default()
        };

        let Some(count) = ctx.page_count else {
            return states;
        };

        states.save = count > 0;
        states.undo = ctx.can_undo;
        states.redo = ctx.can_redo;
        states.zoom_in = ctx.can_zoom_in;
        states.zoom_out = ctx.can_zoom_out;

        let selected = ctx.selected;
        if selected.is_empty() {
            return states;
        }

        states.remove_selected = true;
        states.remove_unselected = true;
        states.rotate_left = true;
        states.rotate_right = true;
        states.cancel_selection = true;

        if let [index] = *selected {
            states.preview = true;
            states.remove_previous = index > 0;
            states.move_left = index > 0;
            states.remove_next = index + 1 < count;
            states.move_right = index + 1 < count;
        }

        states
    }
}

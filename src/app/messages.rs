/// All messages that can be sent through the FLTK channel.
/// Every menu item, toolbar button, and worker thread sends one of these;
/// the dispatch loop in `app::run` handles them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // File
    OpenDocument,
    SaveDocument,
    CloseRequest,

    // Edit
    Undo,
    Redo,
    CancelSelection,

    // Pages
    RemoveSelected,
    RemoveUnselected,
    RemovePrevious,
    RemoveNext,
    RotateLeft,
    RotateRight,
    MoveLeft,
    MoveRight,
    PreviewSelected,

    // View
    ZoomIn,
    ZoomOut,
    SelectionChanged,
    WindowResized(i32, i32),

    // Help
    ShowAbout,

    // Background save worker
    SaveSucceeded,
    SaveFailed,
}

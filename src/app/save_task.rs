//! The single-slot background save.
//!
//! At most one save runs at a time: the slot refuses to start a second one,
//! and the action matrix disables the save action while the slot is running.
//! The worker owns its snapshot and reports back with exactly one message.

use std::path::PathBuf;
use std::thread;

use fltk::app::Sender;

use super::messages::Message;
use crate::pdf::saver::SaveJob;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Default)]
pub struct SaveTask {
    state: SaveState,
}

impl SaveTask {
    /// Claim the slot. Returns false, leaving the slot untouched, if a save
    /// is already running.
    pub fn try_begin(&mut self) -> bool {
        if self.state == SaveState::Running {
            return false;
        }
        self.state = SaveState::Running;
        true
    }

    pub fn finish(&mut self, ok: bool) {
        if self.state != SaveState::Running {
            return;
        }
        self.state = if ok {
            SaveState::Succeeded
        } else {
            SaveState::Failed
        };
    }

    pub fn is_running(&self) -> bool {
        self.state == SaveState::Running
    }

    /// Window close requests are ignored while a save is in flight.
    pub fn blocks_close(&self) -> bool {
        self.is_running()
    }

    pub fn state(&self) -> SaveState {
        self.state
    }
}

/// Serialize `job` to `dest` on a detached worker thread and report the
/// outcome through the channel.
pub fn spawn_save(job: SaveJob, dest: PathBuf, sender: Sender<Message>) {
    thread::spawn(move || match job.write_to(&dest) {
        Ok(()) => {
            tracing::info!(path = %dest.display(), "document saved");
            sender.send(Message::SaveSucceeded);
        }
        Err(err) => {
            tracing::error!(error = %err, path = %dest.display(), "saving the document failed");
            sender.send(Message::SaveFailed);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_refused_while_running() {
        let mut task = SaveTask::default();
        assert!(task.try_begin());
        assert!(task.is_running());

        assert!(!task.try_begin());
        assert!(task.is_running());
    }

    #[test]
    fn test_slot_can_be_reused_after_finishing() {
        let mut task = SaveTask::default();
        assert!(task.try_begin());
        task.finish(true);
        assert_eq!(task.state(), SaveState::Succeeded);
        assert!(!task.is_running());

        assert!(task.try_begin());
        task.finish(false);
        assert_eq!(task.state(), SaveState::Failed);
        assert!(task.try_begin());
    }

    #[test]
    fn test_finish_without_running_save_is_ignored() {
        let mut task = SaveTask::default();
        task.finish(true);
        assert_eq!(task.state(), SaveState::Idle);
    }

    #[test]
    fn test_close_is_blocked_only_while_running() {
        let mut task = SaveTask::default();
        assert!(!task.blocks_close());

        task.try_begin();
        assert!(task.blocks_close());

        task.finish(true);
        assert!(!task.blocks_close());
    }
}

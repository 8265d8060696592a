use super::document::Page;

/// An invertible edit of the page arrangement.
///
/// `Remove` and `Insert` carry their slots sorted by ascending index so that
/// applying them in the right order keeps the remaining indexes stable.
#[derive(Debug, Clone)]
pub enum Command {
    Remove { slots: Vec<(usize, Page)> },
    Insert { slots: Vec<(usize, Page)> },
    Rotate { indexes: Vec<usize>, degrees: i64 },
    Move { from: usize, to: usize },
}

impl Command {
    pub fn apply(&self, pages: &mut Vec<Page>) {
        match self {
            Command::Remove { slots } => {
                for (index, _) in slots.iter().rev() {
                    pages.remove(*index);
                }
            }
            Command::Insert { slots } => {
                for (index, page) in slots {
                    pages.insert(*index, page.clone());
                }
            }
            Command::Rotate { indexes, degrees } => {
                for &index in indexes {
                    let page = &mut pages[index];
                    page.rotation = (page.rotation + degrees).rem_euclid(360);
                }
            }
            Command::Move { from, to } => {
                let page = pages.remove(*from);
                pages.insert(*to, page);
            }
        }
    }

    pub fn inverted(&self) -> Command {
        match self {
            Command::Remove { slots } => Command::Insert {
                slots: slots.clone(),
            },
            Command::Insert { slots } => Command::Remove {
                slots: slots.clone(),
            },
            Command::Rotate { indexes, degrees } => Command::Rotate {
                indexes: indexes.clone(),
                degrees: -degrees,
            },
            Command::Move { from, to } => Command::Move {
                from: *to,
                to: *from,
            },
        }
    }
}

/// Undo/redo history. Executing a new command clears the redo stack.
#[derive(Debug, Default)]
pub struct CommandStack {
    undo: Vec<Command>,
    redo: Vec<Command>,
}

impl CommandStack {
    pub fn execute(&mut self, command: Command, pages: &mut Vec<Page>) {
        command.apply(pages);
        self.undo.push(command);
        self.redo.clear();
    }

    pub fn undo(&mut self, pages: &mut Vec<Page>) -> bool {
        match self.undo.pop() {
            Some(command) => {
                command.inverted().apply(pages);
                self.redo.push(command);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, pages: &mut Vec<Page>) -> bool {
        match self.redo.pop() {
            Some(command) => {
                command.apply(pages);
                self.undo.push(command);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(count: u32) -> Vec<Page> {
        (1..=count).map(|n| Page::new(n, (n, 0))).collect()
    }

    fn numbers(pages: &[Page]) -> Vec<u32> {
        pages.iter().map(|p| p.number).collect()
    }

    #[test]
    fn test_remove_and_undo_restores_arrangement() {
        let mut arrangement = pages(5);
        let mut stack = CommandStack::default();

        let slots = vec![
            (1, arrangement[1].clone()),
            (3, arrangement[3].clone()),
        ];
        stack.execute(Command::Remove { slots }, &mut arrangement);
        assert_eq!(numbers(&arrangement), vec![1, 3, 5]);

        assert!(stack.undo(&mut arrangement));
        assert_eq!(numbers(&arrangement), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_redo_replays_command() {
        let mut arrangement = pages(3);
        let mut stack = CommandStack::default();

        let slots = vec![(0, arrangement[0].clone())];
        stack.execute(Command::Remove { slots }, &mut arrangement);
        stack.undo(&mut arrangement);
        assert!(stack.redo(&mut arrangement));

        assert_eq!(numbers(&arrangement), vec![2, 3]);
        assert!(stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut arrangement = pages(3);
        let mut stack = CommandStack::default();

        stack.execute(
            Command::Rotate {
                indexes: vec![0],
                degrees: 90,
            },
            &mut arrangement,
        );
        stack.undo(&mut arrangement);
        assert!(stack.can_redo());

        stack.execute(Command::Move { from: 0, to: 2 }, &mut arrangement);
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_rotation_accumulates_modulo_360() {
        let mut arrangement = pages(1);
        let mut stack = CommandStack::default();

        for _ in 0..3 {
            stack.execute(
                Command::Rotate {
                    indexes: vec![0],
                    degrees: 90,
                },
                &mut arrangement,
            );
        }
        assert_eq!(arrangement[0].rotation, 270);

        stack.execute(
            Command::Rotate {
                indexes: vec![0],
                degrees: 90,
            },
            &mut arrangement,
        );
        assert_eq!(arrangement[0].rotation, 0);
    }

    #[test]
    fn test_left_rotation_wraps_negative() {
        let mut arrangement = pages(1);
        let mut stack = CommandStack::default();

        stack.execute(
            Command::Rotate {
                indexes: vec![0],
                degrees: -90,
            },
            &mut arrangement,
        );
        assert_eq!(arrangement[0].rotation, 270);

        assert!(stack.undo(&mut arrangement));
        assert_eq!(arrangement[0].rotation, 0);
    }

    #[test]
    fn test_move_round_trips() {
        let mut arrangement = pages(4);
        let mut stack = CommandStack::default();

        stack.execute(Command::Move { from: 3, to: 0 }, &mut arrangement);
        assert_eq!(numbers(&arrangement), vec![4, 1, 2, 3]);

        stack.undo(&mut arrangement);
        assert_eq!(numbers(&arrangement), vec![1, 2, 3, 4]);
    }
}

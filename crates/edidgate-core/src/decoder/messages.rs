#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Warning,
    Failure,
}

impl MessageKind {
    fn slot(self) -> usize {
        match self {
            MessageKind::Warning => 0,
            MessageKind::Failure => 1,
        }
    }
}

/// Warning and failure logs for blocks `0..=max_blocks`.
///
/// One slot more than the block limit so an engine can log against the
/// "block past the end" when a descriptor claims more extensions than fit.
#[derive(Debug, Clone)]
pub struct MessageLogs {
    logs: Vec<[Vec<String>; 2]>,
}

impl MessageLogs {
    pub fn new(max_blocks: usize) -> Self {
        Self {
            logs: vec![[Vec::new(), Vec::new()]; max_blocks + 1],
        }
    }

    pub fn clear(&mut self) {
        for block in &mut self.logs {
            block[0].clear();
            block[1].clear();
        }
    }

    /// Number of block slots (`max_blocks + 1`).
    pub fn slots(&self) -> usize {
        self.logs.len()
    }

    /// Append to a block's log. Returns `false` when `block` has no slot.
    pub fn push(&mut self, block: usize, kind: MessageKind, message: String) -> bool {
        match self.logs.get_mut(block) {
            Some(slot) => {
                slot[kind.slot()].push(message);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, block: usize, kind: MessageKind) -> &[String] {
        self.logs
            .get(block)
            .map(|slot| slot[kind.slot()].as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.logs
            .iter()
            .all(|slot| slot[0].is_empty() && slot[1].is_empty())
    }

    /// Blocks that hold at least one message, ascending.
    pub fn non_empty_blocks(&self) -> impl Iterator<Item = usize> + '_ {
        self.logs
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot[0].is_empty() || !slot[1].is_empty())
            .map(|(block, _)| block)
    }
}

#[cfg(test)]
mod tests {
    use super::{MessageKind, MessageLogs};

    #[test]
    fn has_one_slot_past_block_limit() {
        let mut logs = MessageLogs::new(4);
        assert_eq!(logs.slots(), 5);
        assert!(logs.push(4, MessageKind::Warning, "late".to_string()));
        assert!(!logs.push(5, MessageKind::Warning, "lost".to_string()));
    }

    #[test]
    fn kinds_are_kept_apart() {
        let mut logs = MessageLogs::new(2);
        logs.push(1, MessageKind::Warning, "w".to_string());
        logs.push(1, MessageKind::Failure, "f".to_string());
        assert_eq!(logs.get(1, MessageKind::Warning), ["w".to_string()]);
        assert_eq!(logs.get(1, MessageKind::Failure), ["f".to_string()]);
        assert!(logs.get(0, MessageKind::Failure).is_empty());
        assert_eq!(logs.non_empty_blocks().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn clear_empties_every_block() {
        let mut logs = MessageLogs::new(3);
        for block in 0..=3 {
            logs.push(block, MessageKind::Failure, format!("block {block}"));
        }
        logs.clear();
        assert!(logs.is_empty());
        assert_eq!(logs.slots(), 4);
    }
}

use tokio::sync::mpsc;
use crate::state::ClientCommand;

#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<ClientCommand>,
}

impl CommandSender {
    pub fn new(tx: mpsc::UnboundedSender<ClientCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, cmd: ClientCommand) {
        // The session task only goes away while the window is closing.
        let _ = self.tx.send(cmd);
    }
}

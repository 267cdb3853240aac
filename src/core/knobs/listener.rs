//=========================================================================
// Knob Listener
//=========================================================================
//
// Device event thread feeding control changes into the knob slots.
//
// Architecture:
//   device driver ──Sender<ControlChange>──► KnobListener thread
//                                              └─► KnobWriter::handle()
//
// The thread runs at the device's own cadence and exits when every
// sender has been dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::knob_state::{ControlChange, KnobWriter};

//=== KnobListener ========================================================

/// Handle to the thread forwarding [`ControlChange`] events to a [`KnobWriter`].
pub struct KnobListener {
    handle: JoinHandle<usize>,
}

impl KnobListener {
    /// Spawns the listener thread.
    ///
    /// Drop every clone of the matching sender to stop it.
    pub fn spawn(events: Receiver<ControlChange>, writer: KnobWriter) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name("knob-listener".to_string())
            .spawn(move || {
                let mut matched = 0;
                for cc in events.iter() {
                    if writer.handle(cc) {
                        matched += 1;
                    } else {
                        debug!(target: "knobs", "Ignored {:?}", cc);
                    }
                }
                info!(target: "knobs", "Event source closed after {} knob update(s)", matched);
                matched
            })?;

        Ok(Self { handle })
    }

    /// True once the event source has closed and the thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the thread to exit and returns how many events matched a knob.
    pub fn join(self) -> thread::Result<usize> {
        self.handle.join()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::knobs::{KnobBinding, KnobState};
    use crossbeam_channel::unbounded;
    use std::time::{Duration, Instant};

    #[test]
    fn forwards_matching_events_until_closed() {
        let mut state = KnobState::new(&[KnobBinding::new(0, 20), KnobBinding::new(0, 21)]);
        let (tx, rx) = unbounded();
        let listener = KnobListener::spawn(rx, state.writer()).unwrap();

        tx.send(ControlChange::new(0, 20, 10)).unwrap();
        tx.send(ControlChange::new(5, 5, 99)).unwrap();
        tx.send(ControlChange::new(0, 21, 127)).unwrap();
        tx.send(ControlChange::new(0, 20, 64)).unwrap();
        drop(tx);

        assert_eq!(listener.join().unwrap(), 3);

        state.update();
        assert_eq!(state.knob(0), Some(64));
        assert_eq!(state.knob(1), Some(127));
    }

    #[test]
    fn exits_when_source_is_dropped() {
        let state = KnobState::new(&[]);
        let (tx, rx) = unbounded::<ControlChange>();
        let listener = KnobListener::spawn(rx, state.writer()).unwrap();
        assert!(!listener.is_finished());

        drop(tx);

        let deadline = Instant::now() + Duration::from_secs(5);
        while !listener.is_finished() {
            assert!(Instant::now() < deadline, "listener never exited");
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(listener.join().unwrap(), 0);
    }
}

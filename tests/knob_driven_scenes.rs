//=========================================================================
// Knob-Driven Scenes
//=========================================================================
//
// End-to-end frame loop: a device thread turns a knob, the active scene
// polls the knob state and switches to a scene that loaded in the
// background.
//
//=========================================================================

use std::thread;
use std::time::{Duration, Instant};

use aetheric_scene::prelude::*;
use crossbeam_channel::unbounded;

type Canvas = Vec<String>;

const DIAL: SceneId = SceneId::new(0);
const REWARD: SceneId = SceneId::new(1);

/// Switches to REWARD once knob 0 reaches the goal.
struct Dial {
    knobs: KnobState,
    goal: u8,
    rotation: u8,
}

impl Scene<Canvas> for Dial {
    fn update(&mut self, manager: &mut SceneManager<Canvas>) -> Result<(), BoxError> {
        self.knobs.update();
        self.rotation = self.knobs.knob(0).unwrap_or_default();

        if self.rotation == self.goal && manager.has_scene(REWARD) {
            manager.switch_scene(REWARD)?;
        }
        Ok(())
    }

    fn draw(&self, target: &mut Canvas) {
        target.push(format!("dial {}", self.rotation));
    }
}

/// Loads "assets" on a background thread.
struct Reward {
    assets: Vec<u32>,
    ready: bool,
}

impl Scene<Canvas> for Reward {
    fn update(&mut self, _manager: &mut SceneManager<Canvas>) -> Result<(), BoxError> {
        Ok(())
    }

    fn draw(&self, target: &mut Canvas) {
        target.push(format!("reward {} {}", self.assets.len(), self.ready));
    }

    fn loader(&mut self) -> Option<&mut dyn SceneLoader> {
        Some(self)
    }
}

impl SceneLoader for Reward {
    fn load(&mut self, _context: &LoadContext) -> Result<(), BoxError> {
        thread::sleep(Duration::from_millis(20));
        self.assets = (0..8).collect();
        Ok(())
    }

    fn post_load(&mut self) {
        self.ready = true;
    }
}

fn frame(manager: &mut SceneManager<Canvas>) -> Canvas {
    manager.update().expect("frame update");
    let mut canvas = Canvas::new();
    manager.draw(&mut canvas);
    canvas
}

#[test]
fn knob_turn_switches_to_loaded_scene() {
    let config = KnobConfig {
        midi_device: "test".to_string(),
        knobs: vec![KnobBinding::new(0, 20)],
    };
    let knobs = KnobState::from_config(&config);
    let (device, events) = unbounded();
    let listener = KnobListener::spawn(events, knobs.writer()).unwrap();

    let mut manager = SceneManager::<Canvas>::new();
    manager
        .add_scene(DIAL, Dial { knobs, goal: 100, rotation: 0 })
        .unwrap();
    manager.switch_scene(DIAL).unwrap();
    manager
        .add_scene(REWARD, Reward { assets: Vec::new(), ready: false })
        .unwrap();

    assert_eq!(frame(&mut manager), vec!["dial 0"]);

    // Run frames until the reward scene has loaded.
    let deadline = Instant::now() + Duration::from_secs(5);
    while !manager.has_scene(REWARD) {
        assert!(Instant::now() < deadline, "reward never loaded");
        frame(&mut manager);
        thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(manager.pending_loads(), 0);
    assert_eq!(manager.active_scene(), Some(DIAL));

    device.send(ControlChange::new(0, 20, 100)).unwrap();
    drop(device);
    assert_eq!(listener.join().unwrap(), 1);

    // The dial sees the knob and switches; the reward draws next frame.
    frame(&mut manager);
    assert_eq!(manager.active_scene(), Some(REWARD));
    assert_eq!(frame(&mut manager), vec!["reward 8 true"]);
}

#[test]
fn nothing_registered_reports_no_active_scene() {
    let mut manager = SceneManager::<Canvas>::new();
    let err = manager.update().unwrap_err();
    assert_eq!(err.to_string(), "no scene loaded (0 scene(s) waiting to load)");
}

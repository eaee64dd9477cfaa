pub mod test_macro;

use core::cell::RefCell;

use musegrid::action::{EncoderAction, KeyAction};
use musegrid::channel::{EVENT_CHANNEL, FLASH_CHANNEL, KEYBOARD_REPORT_CHANNEL, LIGHT_CHANNEL};
use musegrid::config::{BehaviorConfig, MuseConfig};
use musegrid::dispatcher::Dispatcher;
use musegrid::eeconfig::FlashOperationMessage;
use musegrid::event::{DipSwitchEvent, Direction, Event, KeyboardEvent};
use musegrid::hid::{KeyboardReport, Report};
use musegrid::keymap::KeyMap;
use musegrid::layout;
use musegrid::light::LightCommand;
use musegrid::muse::{AudioDriver, MuseState};
use static_cell::StaticCell;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub type DefaultKeyMap =
    KeyMap<'static, { layout::ROW }, { layout::COL }, { layout::NUM_LAYER }, { layout::NUM_ENCODER }>;
pub type DefaultDispatcher =
    Dispatcher<'static, { layout::ROW }, { layout::COL }, { layout::NUM_LAYER }, { layout::NUM_ENCODER }>;

/// Build a dispatcher on the stock layout, with the muse tempo lowered so
/// sequencer windows stay short in tests.
pub fn default_dispatcher() -> (DefaultDispatcher, &'static RefCell<DefaultKeyMap>, &'static RefCell<MuseState>) {
    static ACTION_MAP: StaticCell<[[[KeyAction; layout::COL]; layout::ROW]; layout::NUM_LAYER]> = StaticCell::new();
    static ENCODER_MAP: StaticCell<[[EncoderAction; layout::NUM_ENCODER]; layout::NUM_LAYER]> = StaticCell::new();
    static KEYMAP: StaticCell<RefCell<DefaultKeyMap>> = StaticCell::new();
    static MUSE: StaticCell<RefCell<MuseState>> = StaticCell::new();

    let action_map = ACTION_MAP.init(layout::default_keymap());
    let encoder_map = ENCODER_MAP.init(layout::default_encoder_map());
    let keymap = KEYMAP.init(RefCell::new(KeyMap::new(
        action_map,
        Some(encoder_map),
        layout::default_behavior(),
    )));
    let muse = MUSE.init(RefCell::new(MuseState::new(MuseConfig { offset: 70, tempo: 4 })));

    clear_channels();
    (Dispatcher::new(keymap, muse), keymap, muse)
}

/// Build a keymap with `'static` lifetime from arbitrary tables.
pub fn wrap_keymap<const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize>(
    keymap: [[[KeyAction; COL]; ROW]; NUM_LAYER],
    encoder_map: Option<[[EncoderAction; NUM_ENCODER]; NUM_LAYER]>,
    behavior: BehaviorConfig,
) -> &'static RefCell<KeyMap<'static, ROW, COL, NUM_LAYER, NUM_ENCODER>> {
    let keymap = Box::leak(Box::new(keymap));
    let encoder_map = encoder_map.map(|encoder_map| &mut *Box::leak(Box::new(encoder_map)));
    Box::leak(Box::new(RefCell::new(KeyMap::new(keymap, encoder_map, behavior))))
}

pub fn wrap_muse(config: MuseConfig) -> &'static RefCell<MuseState> {
    Box::leak(Box::new(RefCell::new(MuseState::new(config))))
}

pub fn key(row: u8, col: u8, pressed: bool) -> Event {
    Event::Key(KeyboardEvent::key(row, col, pressed))
}

pub fn rotary(direction: Direction, pressed: bool) -> Event {
    Event::Key(KeyboardEvent::rotary_encoder(0, direction, pressed))
}

pub fn dip(id: u8, active: bool) -> Event {
    Event::DipSwitch(DipSwitchEvent { id, active })
}

pub fn clear_channels() {
    EVENT_CHANNEL.clear();
    KEYBOARD_REPORT_CHANNEL.clear();
    LIGHT_CHANNEL.clear();
    FLASH_CHANNEL.clear();
}

pub fn drain_reports() -> Vec<Report> {
    let mut reports = Vec::new();
    while let Ok(report) = KEYBOARD_REPORT_CHANNEL.try_receive() {
        reports.push(report);
    }
    reports
}

pub fn drain_keyboard_reports() -> Vec<KeyboardReport> {
    drain_reports()
        .into_iter()
        .map(|report| match report {
            Report::Keyboard(keyboard_report) => keyboard_report,
            other => panic!("expected a keyboard report, got {other:?}"),
        })
        .collect()
}

pub fn drain_light_commands() -> Vec<LightCommand> {
    let mut commands = Vec::new();
    while let Ok(command) = LIGHT_CHANNEL.try_receive() {
        commands.push(command);
    }
    commands
}

pub fn drain_flash_messages() -> Vec<FlashOperationMessage> {
    let mut messages = Vec::new();
    while let Ok(message) = FLASH_CHANNEL.try_receive() {
        messages.push(message);
    }
    messages
}

/// Records audio driver calls for assertions.
#[derive(Default)]
pub struct RecordingAudio {
    pub played: Vec<(u32, u8)>,
    pub stopped: Vec<u32>,
    pub stop_all_count: usize,
}

impl AudioDriver for RecordingAudio {
    fn play_note(&mut self, frequency: f32, velocity: u8) {
        self.played.push((frequency as u32, velocity));
    }

    fn stop_note(&mut self, frequency: f32) {
        self.stopped.push(frequency as u32);
    }

    fn stop_all_notes(&mut self) {
        self.stop_all_count += 1;
    }
}

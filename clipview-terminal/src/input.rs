/// Key bindings
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use clipview_core::{Axis, SampleMesh};

/// Something the user asked the viewer to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectMesh(SampleMesh),
    ClearMesh,
    SelectAxis(Axis),
    /// Step the low slider handle of the active axis
    MoveLowHandle(i32),
    /// Step the high slider handle of the active axis
    MoveHighHandle(i32),
    /// Nudge the min field of the active axis by whole field steps
    NudgeMin(i32),
    NudgeMax(i32),
    ToggleGrab,
    /// Shift the grabbed box along the active axis
    MoveBox(i32),
    ResetClip,
    ToggleLiveUpdate,
    ToggleGrid,
    ToggleBoundingBox,
    /// Step the scale slider of the active axis
    Scale(i32),
    ResetScale,
    Rotate { pitch: f32, yaw: f32 },
    Quit,
}

const ROTATE_STEP: f32 = 0.1;

/// Translate a key press. Releases and unbound keys map to nothing.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let command = match key.code {
        KeyCode::Esc => Command::Quit,
        KeyCode::Up => rotate(ROTATE_STEP, 0.0),
        KeyCode::Down => rotate(-ROTATE_STEP, 0.0),
        KeyCode::Left => rotate(0.0, -ROTATE_STEP),
        KeyCode::Right => rotate(0.0, ROTATE_STEP),
        KeyCode::Char(c) => return map_char(c),
        _ => return None,
    };
    Some(command)
}

fn map_char(c: char) -> Option<Command> {
    let command = match c {
        'q' => Command::Quit,
        '0' => Command::ClearMesh,
        '1'..='4' => {
            let index = c as usize - '1' as usize;
            Command::SelectMesh(SampleMesh::ALL[index])
        }
        'x' => Command::SelectAxis(Axis::X),
        'y' => Command::SelectAxis(Axis::Y),
        'z' => Command::SelectAxis(Axis::Z),
        '[' => Command::MoveLowHandle(-1),
        ']' => Command::MoveLowHandle(1),
        '{' => Command::MoveHighHandle(-1),
        '}' => Command::MoveHighHandle(1),
        ',' => Command::NudgeMin(-1),
        '.' => Command::NudgeMin(1),
        '<' => Command::NudgeMax(-1),
        '>' => Command::NudgeMax(1),
        'g' => Command::ToggleGrab,
        'h' | 'j' => Command::MoveBox(-1),
        'k' | 'l' => Command::MoveBox(1),
        'c' => Command::ResetClip,
        't' => Command::ToggleLiveUpdate,
        'G' => Command::ToggleGrid,
        'B' => Command::ToggleBoundingBox,
        '+' | '=' => Command::Scale(1),
        '-' => Command::Scale(-1),
        'r' => Command::ResetScale,
        'w' => rotate(ROTATE_STEP, 0.0),
        's' => rotate(-ROTATE_STEP, 0.0),
        'a' => rotate(0.0, -ROTATE_STEP),
        'd' => rotate(0.0, ROTATE_STEP),
        _ => return None,
    };
    Some(command)
}

fn rotate(pitch: f32, yaw: f32) -> Command {
    Command::Rotate { pitch, yaw }
}

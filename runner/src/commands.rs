use snake_engine::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerCommand {
    Turn(Direction),
    TogglePause,
    Start,
    Quit,
}

/// Maps one line of stdin to a command. Arrow names, WASD and vim keys turn;
/// a lone space (or `p`) toggles pause.
pub fn parse_command(line: &str) -> Option<RunnerCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line == " " {
        return Some(RunnerCommand::TogglePause);
    }

    let command = match line.trim().to_ascii_lowercase().as_str() {
        "up" | "arrowup" | "w" | "k" => RunnerCommand::Turn(Direction::Up),
        "down" | "arrowdown" | "s" | "j" => RunnerCommand::Turn(Direction::Down),
        "left" | "arrowleft" | "a" | "h" => RunnerCommand::Turn(Direction::Left),
        "right" | "arrowright" | "d" | "l" => RunnerCommand::Turn(Direction::Right),
        "p" | "pause" | "space" => RunnerCommand::TogglePause,
        "start" | "restart" | "r" => RunnerCommand::Start,
        "q" | "quit" | "exit" => RunnerCommand::Quit,
        _ => return None,
    };
    Some(command)
}

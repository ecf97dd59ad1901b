use crate::config::{Paths, Settings};
use crate::input::{collect_input, map_event, Command};
use crate::model::{Pet, Rules, Status};
use crate::scheduler::CatchupSummary;
use crate::session::{Outcome, Session};
use crate::storage::save_atomic;
use crate::summary::Obituary;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

const AUTOSAVE_EVERY: Duration = Duration::from_secs(10);
const BAR_WIDTH: usize = 20;

/// `08:05 AM` style clock for a minute of the day.
pub fn clock(minute_of_day: u32) -> String {
    let hour = (minute_of_day / 60) % 24;
    let minute = minute_of_day % 60;
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h12:02}:{minute:02} {suffix}")
}

fn bar(value: f64) -> String {
    let filled = ((value / 100.0) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Plain-text status panel for the active pet.
pub fn status_lines(pet: &Pet, rules: &Rules) -> Vec<String> {
    let v = &pet.vitals;
    let daytime = if pet.is_night(rules) { "night" } else { "day" };
    let mut lines = vec![
        format!(
            "{} the {}  ({} years, {})",
            pet.name,
            pet.species.label(),
            pet.age,
            pet.phase.label()
        ),
        format!("{}  [{daytime}]  status: {}", clock(pet.timers.minute_of_day), pet.status.label()),
        String::new(),
        format!("Hunger  {} {:>3.0}", bar(v.hunger), v.hunger),
        format!("Mood    {} {:>3.0}", bar(v.mood), v.mood),
        format!("Energy  {} {:>3.0}", bar(v.energy), v.energy),
        format!("Weight  {} {:>3.0}", bar(v.weight), v.weight),
        format!("Health  {} {:>3.0}", bar(v.health), v.health),
        String::new(),
    ];

    let mut notes = Vec::new();
    if pet.flags.sick {
        notes.push("sick".to_string());
    }
    if pet.flags.dirty {
        notes.push(format!("{} mess", pet.counters.mess));
    }
    if pet.radio_on {
        notes.push("radio on".to_string());
    }
    if pet.flags.special {
        notes.push("special".to_string());
    }
    if pet.in_need(rules) && !pet.is_dead() {
        notes.push("needs attention".to_string());
    }
    if !notes.is_empty() {
        lines.push(notes.join(", "));
    }
    lines
}

pub fn recap_lines(s: &CatchupSummary) -> Vec<String> {
    let mut lines = vec![format!("While you were away: {} minutes simulated", s.minutes_simulated)];
    if s.minutes_dropped > 0 {
        lines.push(format!("  ({} minutes were too long ago to replay)", s.minutes_dropped));
    }
    lines.push(format!(
        "  peak hunger {:.0}, lowest mood {:.0}, lowest health {:.0}",
        s.hunger_max, s.mood_min, s.health_min
    ));
    if s.penalties > 0 {
        lines.push(format!("  neglect cost {} health", s.penalties));
    }
    if s.became_sick {
        lines.push("  your pet got sick".to_string());
    }
    if s.died {
        lines.push("  your pet passed away".to_string());
    }
    lines
}

struct TerminalGuard;

impl TerminalGuard {
    fn begin() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub struct App {
    settings: Settings,
    session: Session,
    paths: Paths,
    message: String,
    recap: Vec<String>,
    should_quit: bool,
    autosave_at: Instant,
}

impl App {
    pub fn new(settings: Settings, session: Session, paths: Paths) -> Self {
        Self {
            settings,
            session,
            paths,
            message: String::new(),
            recap: Vec::new(),
            should_quit: false,
            autosave_at: Instant::now() + AUTOSAVE_EVERY,
        }
    }

    /// Drives the active pet from the wall clock until the player quits.
    pub fn run(mut self) -> anyhow::Result<Session> {
        let _term = TerminalGuard::begin()?;
        let poll = Duration::from_millis(self.settings.poll_ms.clamp(10, 5000));

        while !self.should_quit {
            for ev in collect_input(poll)? {
                match map_event(&ev) {
                    Some(Command::Quit) => self.should_quit = true,
                    Some(Command::Act(action)) => {
                        self.tick();
                        self.message = match self.session.act(action, &self.settings.rules) {
                            Outcome::Applied => format!("{} ok", action.label()),
                            Outcome::Ignored => format!("{} had no effect", action.label()),
                            Outcome::NoActivePet => "no pet selected".to_string(),
                        };
                        self.recap.clear();
                    }
                    None => {}
                }
            }

            self.tick();
            self.draw()?;

            if Instant::now() >= self.autosave_at {
                save_atomic(&self.paths.save_path, &self.session)?;
                self.autosave_at = Instant::now() + AUTOSAVE_EVERY;
            }
        }

        save_atomic(&self.paths.save_path, &self.session)?;
        Ok(self.session)
    }

    fn tick(&mut self) {
        let was_dead = self.session.active_pet().is_some_and(Pet::is_dead);
        if let Some(summary) = self.session.tick(chrono::Utc::now(), &self.settings.rules) {
            // one game-minute per poll is routine; only longer gaps get a recap
            if summary.minutes_simulated > 60 && summary.has_anything() {
                self.recap = recap_lines(&summary);
            }
        }
        if !was_dead && self.session.active_pet().is_some_and(Pet::is_dead) {
            self.message = "your pet has passed on".to_string();
        }
    }

    fn draw(&self) -> anyhow::Result<()> {
        let mut out = io::stdout();
        queue!(out, cursor::MoveTo(0, 0), Clear(ClearType::All))?;

        let mut lines = match self.session.active_pet() {
            None => vec!["No pet selected. Quit and run `digipet new <name>`.".to_string()],
            Some(pet) => match Obituary::for_pet(pet) {
                Some(card) => card.to_string().lines().map(str::to_string).collect(),
                None => status_lines(pet, &self.settings.rules),
            },
        };
        lines.push(String::new());
        lines.extend(self.recap.iter().cloned());
        lines.push(self.message.clone());
        lines.push("[f]eed  [p]lay  [s]leep  [c]lean  [r]adio  [q]uit".to_string());

        let color = self.status_color();
        for (row, line) in lines.iter().enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            if row == 0 && self.settings.enable_color {
                queue!(out, SetForegroundColor(color), Print(line), ResetColor)?;
            } else {
                queue!(out, Print(line))?;
            }
        }
        out.flush()?;
        Ok(())
    }

    fn status_color(&self) -> Color {
        match self.session.active_pet().map(|p| p.status) {
            Some(Status::Dead) => Color::DarkGrey,
            Some(Status::Sleeping) => Color::Blue,
            Some(Status::Vomiting | Status::Pooping) => Color::Yellow,
            Some(Status::Dancing | Status::Playing) => Color::Magenta,
            _ => Color::Green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Species;

    #[test]
    fn clock_uses_twelve_hour_format() {
        assert_eq!(clock(0), "12:00 AM");
        assert_eq!(clock(480), "08:00 AM");
        assert_eq!(clock(725), "12:05 PM");
        assert_eq!(clock(1439), "11:59 PM");
    }

    #[test]
    fn bars_scale_with_value() {
        assert_eq!(bar(0.0), ".".repeat(BAR_WIDTH));
        assert_eq!(bar(100.0), "#".repeat(BAR_WIDTH));
        assert_eq!(bar(50.0).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn status_panel_mentions_flags() {
        let rules = Rules::default();
        let mut pet = Pet::new("Mochi", Species::Fox, chrono::Utc::now());
        pet.flags.sick = true;
        pet.radio_on = true;
        let lines = status_lines(&pet, &rules);
        assert!(lines[0].starts_with("Mochi the Fox"));
        assert!(lines[1].contains("08:00 AM"));
        assert!(lines.last().unwrap().contains("sick"));
        assert!(lines.last().unwrap().contains("radio on"));
    }
}

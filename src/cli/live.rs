use std::time::{Duration, Instant};

use folio::core::app::App;
use folio::core::scheduler::Millis;

/// How the driver maps scheduler time onto the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Sleep until each task is due.
    Real,
    /// Jump straight to the next due time.
    Instant,
}

impl Pace {
    pub fn from_flag(instant: bool) -> Self {
        if instant { Pace::Instant } else { Pace::Real }
    }
}

/// Run the app's scheduler until it has no tasks left or `frame` returns
/// false. `frame` is called after every batch of due tasks.
pub fn drive<F>(app: &mut App, pace: Pace, mut frame: F) -> anyhow::Result<()>
where
    F: FnMut(&App) -> anyhow::Result<bool>,
{
    let start = Instant::now();
    let elapsed = |start: Instant| -> Millis { start.elapsed().as_millis().try_into().unwrap_or(Millis::MAX) };
    while let Some(due) = app.next_fire() {
        let now = match pace {
            Pace::Instant => due,
            Pace::Real => {
                let wall = elapsed(start);
                if due > wall {
                    std::thread::sleep(Duration::from_millis(due - wall));
                }
                elapsed(start).max(due)
            }
        };
        app.advance(now);
        if !frame(app)? {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::config::types::FolioConfig;
    use folio::core::catalog::Catalog;
    use folio::core::contact::ContactMessage;
    use folio::core::view::ids;

    #[test]
    fn instant_pace_runs_contact_cycle_to_completion() {
        let mut app = App::new(FolioConfig::default(), Catalog::empty());
        app.submit_contact(ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
        })
        .unwrap();
        let mut labels = Vec::new();
        drive(&mut app, Pace::Instant, |app| {
            labels.push((app.now(), app.surface().text(ids::CONTACT_BUTTON).unwrap_or("").to_string()));
            Ok(true)
        })
        .unwrap();
        assert_eq!(
            labels,
            vec![
                (0, "Sending...".to_string()),
                (2000, "Message Sent!".to_string()),
                (5000, "Send Message".to_string()),
            ]
        );
        assert!(!app.contact_pending());
    }

    #[test]
    fn frame_can_stop_early() {
        let mut app = App::new(FolioConfig::default(), Catalog::empty());
        app.surface_mut().mount(ids::TYPING_TEXT);
        app.start_typewriter();
        let mut frames = 0;
        drive(&mut app, Pace::Instant, |_| {
            frames += 1;
            Ok(frames < 3)
        })
        .unwrap();
        assert_eq!(frames, 3);
        assert_eq!(app.surface().text(ids::TYPING_TEXT), Some("Pyt"));
    }
}

//=========================================================================
// Screen Transition
//=========================================================================
//
// Timed enter/exit state machine carried by every screen in the stack.
//
// States:
//   Entering ──(position reaches 0)──► Active
//   Active/Entering ──(covered)──► Exiting ──(position reaches 1)──► Hidden
//   any ──(exit requested)──► Exiting ──(position reaches 1)──► removed
//
// Position is normalized: 0 = fully visible, 1 = fully transitioned out.
// It moves linearly in wall-clock time and snaps for zero durations.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== TransitionState =====================================================

/// Lifecycle phase of a screen. Derived from updates, never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionState {
    /// Transitioning on (fading in).
    Entering,

    /// Fully on and eligible for focus.
    Active,

    /// Transitioning off, either covered or leaving for good.
    Exiting,

    /// Fully covered; still updated, not drawn.
    Hidden,
}

impl TransitionState {
    /// `Entering` or `Active`: the screen counts as on-screen for focus
    /// and covering.
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Entering | Self::Active)
    }
}

//=== TransitionStep ======================================================

/// Outcome of one [`Transition::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// Keep the screen in the stack.
    Continue,

    /// The exit transition finished; the screen must be removed.
    ExitComplete,
}

//=== Transition ==========================================================

/// Per-screen transition timing and state.
///
/// Durations are fixed at construction. A new transition starts fully
/// out (`position == 1`) in the `Entering` state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    on_duration: Duration,
    off_duration: Duration,
    position: f32,
    state: TransitionState,
    exiting: bool,
    other_screen_has_focus: bool,
}

impl Transition {
    //--- Construction -----------------------------------------------------

    pub fn new(on_duration: Duration, off_duration: Duration) -> Self {
        Self {
            on_duration,
            off_duration,
            position: 1.0,
            state: TransitionState::Entering,
            exiting: false,
            other_screen_has_focus: false,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Normalized progress, `0` = fully on, `1` = fully off.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// `1 - position`, for fades.
    pub fn alpha(&self) -> f32 {
        1.0 - self.position
    }

    pub fn on_duration(&self) -> Duration {
        self.on_duration
    }

    pub fn off_duration(&self) -> Duration {
        self.off_duration
    }

    /// Whether the screen is permanently leaving.
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// No other screen holds focus and the state is `Entering`/`Active`.
    pub fn is_active(&self) -> bool {
        !self.other_screen_has_focus && self.state.is_visible()
    }

    //--- Exit Control -----------------------------------------------------

    /// Marks the screen as leaving. Sticky and idempotent.
    pub(crate) fn begin_exit(&mut self) {
        self.exiting = true;
    }

    //--- Update -----------------------------------------------------------

    /// Advances the state machine by one frame.
    ///
    /// `other_screen_has_focus` and `covered_by_other_screen` come from the
    /// stack's top-to-bottom scan.
    pub fn advance(
        &mut self,
        elapsed: Duration,
        other_screen_has_focus: bool,
        covered_by_other_screen: bool,
    ) -> TransitionStep {
        self.other_screen_has_focus = other_screen_has_focus;

        if self.exiting {
            self.state = TransitionState::Exiting;
            if !self.step(elapsed, self.off_duration, 1.0) {
                return TransitionStep::ExitComplete;
            }
        } else if covered_by_other_screen {
            self.state = if self.step(elapsed, self.off_duration, 1.0) {
                TransitionState::Exiting
            } else {
                TransitionState::Hidden
            };
        } else {
            self.state = if self.step(elapsed, self.on_duration, -1.0) {
                TransitionState::Entering
            } else {
                TransitionState::Active
            };
        }

        TransitionStep::Continue
    }

    /// Moves the position toward `direction` and clamps it to `[0, 1]`.
    ///
    /// Returns `true` while the transition is still in progress.
    fn step(&mut self, elapsed: Duration, duration: Duration, direction: f32) -> bool {
        let delta = if duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / duration.as_secs_f64()) as f32
        };

        self.position = (self.position + delta * direction).clamp(0.0, 1.0);

        if direction < 0.0 {
            self.position > 0.0
        } else {
            self.position < 1.0
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    //--- Entering / Active ------------------------------------------------

    #[test]
    fn starts_fully_out_and_entering() {
        let transition = Transition::new(ms(500), ms(500));
        assert_eq!(transition.state(), TransitionState::Entering);
        assert_eq!(transition.position(), 1.0);
        assert_eq!(transition.alpha(), 0.0);
    }

    #[test]
    fn zero_on_duration_is_active_after_first_update() {
        let mut transition = Transition::new(Duration::ZERO, Duration::ZERO);
        transition.advance(ms(16), false, false);

        assert_eq!(transition.state(), TransitionState::Active);
        assert_eq!(transition.position(), 0.0);
    }

    #[test]
    fn enters_linearly_in_wall_clock_time() {
        let mut transition = Transition::new(ms(400), ms(400));

        transition.advance(ms(100), false, false);
        assert_eq!(transition.state(), TransitionState::Entering);
        assert!((transition.position() - 0.75).abs() < 1e-6);

        transition.advance(ms(300), false, false);
        assert_eq!(transition.state(), TransitionState::Active);
        assert_eq!(transition.position(), 0.0);
    }

    #[test]
    fn is_active_requires_focus_and_visibility() {
        let mut transition = Transition::new(Duration::ZERO, Duration::ZERO);

        transition.advance(ms(16), true, false);
        assert!(!transition.is_active());

        transition.advance(ms(16), false, false);
        assert!(transition.is_active());
    }

    //--- Covering ---------------------------------------------------------

    #[test]
    fn covered_screen_exits_then_hides_without_removal() {
        let mut transition = Transition::new(Duration::ZERO, ms(200));
        transition.advance(ms(16), false, false);

        assert_eq!(transition.advance(ms(100), false, true), TransitionStep::Continue);
        assert_eq!(transition.state(), TransitionState::Exiting);

        assert_eq!(transition.advance(ms(100), false, true), TransitionStep::Continue);
        assert_eq!(transition.state(), TransitionState::Hidden);
        assert_eq!(transition.position(), 1.0);

        assert_eq!(transition.advance(ms(100), false, true), TransitionStep::Continue);
        assert_eq!(transition.state(), TransitionState::Hidden);
        assert_eq!(transition.position(), 1.0);
    }

    #[test]
    fn uncovered_hidden_screen_comes_back() {
        let mut transition = Transition::new(ms(100), Duration::ZERO);
        transition.advance(ms(100), false, false);
        transition.advance(ms(16), false, true);
        assert_eq!(transition.state(), TransitionState::Hidden);

        transition.advance(ms(50), false, false);
        assert_eq!(transition.state(), TransitionState::Entering);
        transition.advance(ms(50), false, false);
        assert_eq!(transition.state(), TransitionState::Active);
    }

    //--- Exiting ----------------------------------------------------------

    #[test]
    fn exiting_reports_completion_once_fully_out() {
        let mut transition = Transition::new(Duration::ZERO, ms(200));
        transition.advance(ms(16), false, false);
        transition.begin_exit();

        assert_eq!(transition.advance(ms(100), false, false), TransitionStep::Continue);
        assert_eq!(transition.state(), TransitionState::Exiting);
        assert_eq!(transition.advance(ms(100), false, false), TransitionStep::ExitComplete);
    }

    #[test]
    fn exit_flag_is_sticky_and_idempotent() {
        let mut transition = Transition::new(ms(100), ms(100));
        transition.begin_exit();
        transition.begin_exit();
        assert!(transition.is_exiting());

        transition.advance(ms(10), false, false);
        assert!(transition.is_exiting());
        transition.advance(ms(10), false, true);
        assert!(transition.is_exiting());
    }

    #[test]
    fn exiting_overrides_covering() {
        let mut transition = Transition::new(Duration::ZERO, ms(100));
        transition.begin_exit();
        transition.advance(ms(10), false, true);
        assert_eq!(transition.state(), TransitionState::Exiting);
    }

    //--- Bounds -----------------------------------------------------------

    #[test]
    fn position_stays_in_unit_range() {
        let durations = [Duration::ZERO, ms(1), ms(16), ms(500), Duration::from_secs(10)];
        let elapsed = [Duration::ZERO, ms(1), ms(16), ms(1000), Duration::from_secs(60)];

        for &on in &durations {
            for &off in &durations {
                let mut transition = Transition::new(on, off);
                for (frame, &dt) in elapsed.iter().cycle().take(40).enumerate() {
                    let covered = frame % 3 == 0;
                    if frame == 30 {
                        transition.begin_exit();
                    }
                    transition.advance(dt, false, covered);
                    let position = transition.position();
                    assert!((0.0..=1.0).contains(&position), "position {position} out of range");
                }
            }
        }
    }

    #[test]
    fn zero_elapsed_keeps_position() {
        let mut transition = Transition::new(ms(100), ms(100));
        transition.advance(ms(50), false, false);
        let before = transition.position();

        transition.advance(Duration::ZERO, false, false);
        assert_eq!(transition.position(), before);
        assert_eq!(transition.state(), TransitionState::Entering);
    }
}

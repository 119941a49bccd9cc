//! The ask → celebrate → schedule interaction.
//!
//! The controller is driven entirely from outside: user actions call
//! `decline`, `accept`, `pick_date`, `pick_activity` and `confirm`, and the
//! driver calls `tick` whenever a deadline from `next_deadline` passes.
//! Nothing here sleeps or spawns.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::activity::ActivityType;
use crate::calendar::MonthBounds;
use crate::clock::Clock;
use crate::error::DateAskResult;
use crate::gateway::PersistenceGateway;
use crate::record::ResponseRecord;
use crate::reluctance::Reluctance;
use crate::timeline::{Timeline, Timeout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Asking,
    Celebrating,
    Scheduling { confirmed: bool },
}

/// Size of the area the celebration is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

pub struct Controller {
    gateway: PersistenceGateway,
    clock: Box<dyn Clock>,
    stage: Stage,
    reluctance: Reluctance,
    /// Present from acceptance onwards.
    record: Option<ResponseRecord>,
    chosen_date: Option<NaiveDate>,
    activity: ActivityType,
    bounds: Option<MonthBounds>,
    timeline: Timeline,
    effect_active: bool,
    viewport: Option<Viewport>,
}

impl Controller {
    /// Start a session, resuming a stored acceptance if there is one.
    pub fn new(gateway: PersistenceGateway, clock: impl Clock + 'static) -> Self {
        let mut controller = Controller {
            gateway,
            clock: Box::new(clock),
            stage: Stage::Asking,
            reluctance: Reluctance::new(),
            record: None,
            chosen_date: None,
            activity: ActivityType::default(),
            bounds: None,
            timeline: Timeline::new(),
            effect_active: false,
            viewport: None,
        };

        if let Some(record) = controller.gateway.hydrate() {
            let confirmed = record.is_confirmed();
            debug!(confirmed, "Resuming stored response");

            controller.chosen_date = record.chosen_date;
            controller.activity = record.activity;
            controller.record = Some(record);
            controller.bounds = Some(MonthBounds::containing(controller.clock.today()));
            controller.stage = Stage::Scheduling { confirmed };
        }

        controller
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn reluctance(&self) -> Reluctance {
        self.reluctance
    }

    pub fn record(&self) -> Option<&ResponseRecord> {
        self.record.as_ref()
    }

    pub fn chosen_date(&self) -> Option<NaiveDate> {
        self.chosen_date
    }

    pub fn activity(&self) -> ActivityType {
        self.activity
    }

    /// The pickable month. Only set once scheduling has begun.
    pub fn bounds(&self) -> Option<MonthBounds> {
        self.bounds
    }

    pub fn effect_active(&self) -> bool {
        self.effect_active
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.stage, Stage::Scheduling { confirmed: true })
    }

    /// Today according to the controller's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timeline.next_deadline()
    }

    pub fn has_remote(&self) -> bool {
        self.gateway.has_sink()
    }

    /// Say no. Only makes "yes" bigger.
    pub fn decline(&mut self) -> bool {
        if self.stage != Stage::Asking {
            return false;
        }
        self.reluctance.decline();
        debug!(reluctance = self.reluctance.magnitude(), "Declined");
        true
    }

    /// Say yes: save the acceptance and start celebrating.
    pub fn accept(&mut self) -> bool {
        if self.stage != Stage::Asking {
            return false;
        }

        let now = self.clock.now();
        let record = ResponseRecord::accepted_at(now);

        if let Err(e) = self.gateway.save(&record) {
            warn!("Could not save acceptance: {e}");
        }

        info!(reluctance = self.reluctance.magnitude(), "Accepted");

        self.record = Some(record);
        self.stage = Stage::Celebrating;
        self.effect_active = true;
        self.timeline.arm(Timeout::EffectTeardown, now);
        self.timeline.arm(Timeout::AdvanceToScheduling, now);
        true
    }

    /// Fire every timeout that is due. Returns what fired.
    pub fn tick(&mut self) -> Vec<Timeout> {
        let fired = self.timeline.take_due(self.clock.now());

        for timeout in &fired {
            match timeout {
                Timeout::EffectTeardown => self.teardown_effect(),
                Timeout::AdvanceToScheduling => self.enter_scheduling(),
            }
        }

        fired
    }

    /// Track the drawing area while the celebration is on screen.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.stage == Stage::Celebrating && self.effect_active {
            self.viewport = Some(Viewport { width, height });
        }
    }

    /// Choose a day. Returns `Ok(false)` outside scheduling and an error for
    /// days outside the bounded month.
    pub fn pick_date(&mut self, date: NaiveDate) -> DateAskResult<bool> {
        let (Stage::Scheduling { .. }, Some(bounds)) = (self.stage, self.bounds) else {
            return Ok(false);
        };

        bounds.check(date)?;
        self.chosen_date = Some(date);
        Ok(true)
    }

    pub fn pick_activity(&mut self, activity: ActivityType) -> bool {
        if !matches!(self.stage, Stage::Scheduling { .. }) {
            return false;
        }
        self.activity = activity;
        true
    }

    pub fn can_confirm(&self) -> bool {
        self.stage == Stage::Scheduling { confirmed: false }
            && self.chosen_date.is_some()
            && self.record.is_some()
    }

    /// Lock in the chosen date and activity.
    ///
    /// Returns `Ok(false)` without touching anything when there is nothing
    /// to confirm. A failed local write leaves the session unconfirmed.
    pub fn confirm(&mut self) -> DateAskResult<bool> {
        if !self.can_confirm() {
            return Ok(false);
        }
        let Some(mut record) = self.record.clone() else {
            return Ok(false);
        };

        let now = self.clock.now();
        record.chosen_date = self.chosen_date;
        record.activity = self.activity;
        if !record.confirm(now) {
            return Ok(false);
        }

        self.gateway.save(&record)?;
        self.gateway.forward(&record, now);

        info!(date = ?record.chosen_date, activity = %record.activity, "Confirmed");

        self.record = Some(record);
        self.stage = Stage::Scheduling { confirmed: true };
        Ok(true)
    }

    fn teardown_effect(&mut self) {
        self.effect_active = false;
        self.viewport = None;
    }

    fn enter_scheduling(&mut self) {
        self.teardown_effect();
        self.timeline.cancel(Timeout::EffectTeardown);
        self.bounds = Some(MonthBounds::containing(self.clock.today()));
        self.stage = Stage::Scheduling { confirmed: false };
    }
}

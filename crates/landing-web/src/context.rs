#![forbid(unsafe_code)]

//! Page state for one page lifetime.
//!
//! [`PageContext`] is built once when the page loads. It owns every piece of
//! state the handlers touch and turns each routed event into [`DomPatch`]es.
//! After [`PageContext::teardown`] every event is ignored.

use core::time::Duration;

use landing_core::event::{ClickTarget, PageEvent};
use landing_core::{debug, info};
use landing_forms::{
    AttemptOutcome, Field, FieldValidator, Form, RuleTable, SubmissionController, SubmitControl,
    contact_rule_specs,
};
use landing_widgets::menu::{BUTTON_ACTIVE_CLASS, NAV_OPEN_CLASS};
use landing_widgets::nav::ACTIVE_CLASS;
use landing_widgets::reveal::{FADE_IN_CLASS, VISIBLE_CLASS};
use landing_widgets::{
    ActiveChange, MobileMenu, NavHighlighter, NotificationChange, NotificationConfig,
    NotificationId, NotificationPresenter, RevealOptions, RevealTracker, RippleEffects,
};

use crate::config::PageConfig;
use crate::error::PageError;
use crate::handlers::{Handler, HandlerRegistry};
use crate::layout::PageLayout;
use crate::patch::{DomPatch, LOADING_CLASS, SHOW_CLASS, selector};
use crate::transport::WebTransport;

/// Everything the page's handlers read and write.
#[derive(Debug)]
pub struct PageContext {
    config: PageConfig,
    layout: PageLayout,
    registry: HandlerRegistry,
    rules: RuleTable,
    form: Form,
    submission: SubmissionController<WebTransport>,
    notifications: NotificationPresenter,
    nav: NavHighlighter,
    menu: MobileMenu,
    reveal: RevealTracker,
    ripples: RippleEffects,
    initialized: bool,
    closed: bool,
}

impl PageContext {
    /// Build the context for `layout`.
    ///
    /// Fails when a configured rule does not compile, or, with strict error
    /// slots, when a field has no error element.
    pub fn new(config: PageConfig, layout: PageLayout) -> Result<Self, PageError> {
        let rules = RuleTable::with_overrides(&contact_rule_specs(), &config.rules)?;
        let form = Form::new(layout.fields.clone(), config.strict_error_slots)?;
        let notifications = NotificationPresenter::with_config(NotificationConfig {
            timeout: config.notification_timeout(),
        });
        let nav = NavHighlighter::new(layout.nav_links.clone()).with_offset(config.scroll_offset);
        let reveal = RevealTracker::new(
            layout.reveal_elements.iter().cloned(),
            RevealOptions {
                threshold: config.reveal_threshold,
                root_margin_bottom: config.reveal_root_margin_bottom,
            },
        );
        let ripples = RippleEffects::new(config.ripple_lifetime());
        let submission = SubmissionController::new(WebTransport::from_config(&config));
        let registry = HandlerRegistry::for_layout(&layout);

        info!(
            fields = layout.fields.len(),
            bindings = registry.len(),
            transport = ?config.transport,
            "page context created"
        );
        Ok(Self {
            config,
            layout,
            registry,
            rules,
            form,
            submission,
            notifications,
            nav,
            menu: MobileMenu::new(),
            reveal,
            ripples,
            initialized: false,
            closed: false,
        })
    }

    /// Context for the shipped page.
    pub fn contact(config: PageConfig) -> Result<Self, PageError> {
        Self::new(config, PageLayout::contact())
    }

    // --- Accessors ---

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Page layout.
    #[must_use]
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Listener table.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// The contact form.
    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Submission controller.
    #[must_use]
    pub fn submission(&self) -> &SubmissionController<WebTransport> {
        &self.submission
    }

    /// Notification presenter.
    #[must_use]
    pub fn notifications(&self) -> &NotificationPresenter {
        &self.notifications
    }

    /// Nav highlighter.
    #[must_use]
    pub fn nav(&self) -> &NavHighlighter {
        &self.nav
    }

    /// Mobile menu.
    #[must_use]
    pub fn menu(&self) -> MobileMenu {
        self.menu
    }

    /// Reveal tracker.
    #[must_use]
    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    /// Live ripples.
    #[must_use]
    pub fn ripples(&self) -> &RippleEffects {
        &self.ripples
    }

    /// The delivery transport.
    pub fn transport_mut(&mut self) -> &mut WebTransport {
        self.submission.transport_mut()
    }

    /// Whether the page has been torn down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Earliest time a timer is due.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        [
            self.submission.deadline(),
            self.notifications.deadline(),
            self.ripples.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    // --- Dispatch ---

    /// Handle `event` at `now`, appending patches to `out`.
    ///
    /// Returns whether the event was routed to a handler. Patches emitted
    /// before an error are kept in `out`.
    pub fn dispatch(
        &mut self,
        event: PageEvent,
        now: Duration,
        out: &mut Vec<DomPatch>,
    ) -> Result<bool, PageError> {
        if self.closed {
            debug!(kind = ?event.kind(), "event after teardown ignored");
            return Ok(false);
        }
        let Some(handler) = self.registry.route(&event, &self.layout) else {
            debug!(kind = ?event.kind(), "unbound event ignored");
            return Ok(false);
        };

        match (handler, event) {
            (Handler::Init, PageEvent::Loaded) => self.init(out),
            (Handler::ClearFieldError, PageEvent::Input { field, value }) => {
                if let Some(f) = self.form.field_mut(&field) {
                    f.set_value(value);
                    f.clear_error();
                    clear_field_patches(f, out);
                }
            }
            (Handler::ValidateField, PageEvent::Blur { field, value }) => {
                let validator = FieldValidator::new(&self.rules);
                if let Some(f) = self.form.field_mut(&field) {
                    if let Some(value) = value {
                        f.set_value(value);
                    }
                    validator.validate(f);
                    field_patches(f, out);
                }
            }
            (Handler::SubmitForm, PageEvent::Submit) => self.submit(now, out)?,
            (
                Handler::NavigateTo,
                PageEvent::Click {
                    target: ClickTarget::NavLink { href },
                    ..
                },
            ) => self.navigate(&href, out),
            (Handler::ToggleMenu, PageEvent::Click { .. }) => {
                let open = self.menu.toggle();
                out.push(DomPatch::toggle_class(self.nav_selector(), NAV_OPEN_CLASS, open));
                out.push(DomPatch::toggle_class(
                    self.menu_selector(),
                    BUTTON_ACTIVE_CLASS,
                    open,
                ));
            }
            (
                Handler::DismissNotification,
                PageEvent::Click {
                    target: ClickTarget::NotificationClose { id },
                    ..
                },
            ) => {
                self.notifications.dismiss(NotificationId::new(id));
                self.flush_notifications(out);
            }
            (
                Handler::Ripple,
                PageEvent::Click {
                    target: ClickTarget::Button { element, rect },
                    client_x,
                    client_y,
                },
            ) => {
                let ripple = self.ripples.spawn(element, &rect, client_x, client_y, now);
                out.push(DomPatch::spawn_ripple(ripple));
            }
            (Handler::HighlightNav, PageEvent::Scroll { scroll_y }) => {
                if let Some(change) = self.nav.on_scroll(scroll_y) {
                    active_link_patches(&change, out);
                }
            }
            (Handler::MeasureSections, PageEvent::SectionsMeasured { sections }) => {
                self.nav.set_sections(sections);
            }
            (
                Handler::Reveal,
                PageEvent::Intersect {
                    element,
                    ratio,
                    is_intersecting,
                },
            ) => {
                if self.reveal.observe(&element, ratio, is_intersecting) {
                    out.push(DomPatch::add_class(selector::class(&element), VISIBLE_CLASS));
                }
            }
            (Handler::Teardown, PageEvent::Unload) => self.teardown(now),
            (handler, event) => {
                debug!(?handler, kind = ?event.kind(), "handler does not accept event");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Fire due timers at `now`: resolve the delivery, expire the
    /// notification, remove finished ripples.
    pub fn fire_timers(&mut self, now: Duration, out: &mut Vec<DomPatch>) -> Result<(), PageError> {
        if self.closed {
            return Ok(());
        }
        let delivery = self.poll_submission(now, out);
        self.notifications.tick(now);
        self.flush_notifications(out);
        for ripple in self.ripples.expire(now) {
            out.push(DomPatch::RemoveRipple { id: ripple.id });
        }
        delivery
    }

    /// End the page's lifetime: drop the in-flight delivery, the
    /// notification and pending ripples. Later events are ignored.
    pub fn teardown(&mut self, now: Duration) {
        if self.closed {
            return;
        }
        self.submission.teardown(now);
        self.notifications.close();
        self.notifications.drain_changes();
        self.ripples.clear();
        self.closed = true;
        info!("page torn down");
    }

    // --- Handlers ---

    fn init(&mut self, out: &mut Vec<DomPatch>) {
        if self.initialized {
            debug!("page already initialized");
            return;
        }
        self.initialized = true;
        for element in self.reveal.elements() {
            out.push(DomPatch::add_class(selector::class(element), FADE_IN_CLASS));
        }
        info!("page initialized");
    }

    fn submit(&mut self, now: Duration, out: &mut Vec<DomPatch>) -> Result<(), PageError> {
        out.push(DomPatch::PreventDefault);
        let before = self.submission.control();
        let validator = FieldValidator::new(&self.rules);
        let result = self
            .submission
            .submit(&mut self.form, &validator, &mut self.notifications, now);

        for field in self.form.submit_checked() {
            field_patches(field, out);
        }
        self.control_patches(before, out);
        self.flush_notifications(out);
        result.map(|_| ()).map_err(PageError::from)
    }

    fn poll_submission(&mut self, now: Duration, out: &mut Vec<DomPatch>) -> Result<(), PageError> {
        if !self.submission.is_in_flight() {
            return Ok(());
        }
        let before = self.submission.control();
        let result = self
            .submission
            .poll(&mut self.form, &mut self.notifications, now);

        let succeeded = !self.submission.is_in_flight()
            && self
                .submission
                .last_attempt()
                .is_some_and(|a| a.outcome == AttemptOutcome::Succeeded);
        if succeeded {
            out.push(DomPatch::ResetForm {
                target: selector::id(&self.layout.form_id),
            });
        }
        self.control_patches(before, out);
        self.flush_notifications(out);
        result.map(|_| ()).map_err(PageError::from)
    }

    fn navigate(&mut self, href: &str, out: &mut Vec<DomPatch>) {
        out.push(DomPatch::PreventDefault);
        let activation = self.nav.activate(href);
        if let Some(id) = activation.scroll_to {
            out.push(DomPatch::ScrollIntoView {
                target: selector::id(&id),
            });
        }
        if let Some(change) = activation.change {
            active_link_patches(&change, out);
        }
        if self.menu.close() {
            out.push(DomPatch::remove_class(self.nav_selector(), NAV_OPEN_CLASS));
            out.push(DomPatch::remove_class(self.menu_selector(), BUTTON_ACTIVE_CLASS));
        }
    }

    // --- Patch helpers ---

    fn control_patches(&self, before: SubmitControl, out: &mut Vec<DomPatch>) {
        let after = self.submission.control();
        if after == before {
            return;
        }
        let target = self.submit_selector();
        out.push(DomPatch::toggle_class(target.clone(), LOADING_CLASS, after.is_loading()));
        out.push(DomPatch::SetDisabled {
            target,
            disabled: after.is_disabled(),
        });
    }

    fn flush_notifications(&mut self, out: &mut Vec<DomPatch>) {
        for change in self.notifications.drain_changes() {
            out.push(match change {
                NotificationChange::Shown(n) => DomPatch::show_notification(&n),
                NotificationChange::Removed(id) => DomPatch::RemoveNotification { id },
            });
        }
    }

    fn submit_selector(&self) -> String {
        format!(
            "{} {}",
            selector::id(&self.layout.form_id),
            selector::class(&self.layout.submit_button)
        )
    }

    fn nav_selector(&self) -> String {
        selector::class(&self.layout.nav)
    }

    fn menu_selector(&self) -> String {
        selector::class(&self.layout.menu_button)
    }
}

/// Mirror a field's validation state. Fields without an error element get
/// no patches.
fn field_patches(field: &Field, out: &mut Vec<DomPatch>) {
    let Some(slot) = field.error_slot() else {
        return;
    };
    let slot_target = selector::id(&field.spec().error_slot_id());
    let control = selector::field(field.name());
    if slot.is_visible() {
        out.push(DomPatch::SetText {
            target: slot_target.clone(),
            text: slot.message().to_string(),
        });
        out.push(DomPatch::add_class(slot_target, SHOW_CLASS));
    } else {
        out.push(DomPatch::remove_class(slot_target, SHOW_CLASS));
    }
    out.push(DomPatch::border(control, field.validity().border_color()));
}

fn clear_field_patches(field: &Field, out: &mut Vec<DomPatch>) {
    if field.error_slot().is_some() {
        out.push(DomPatch::remove_class(
            selector::id(&field.spec().error_slot_id()),
            SHOW_CLASS,
        ));
        out.push(DomPatch::border(
            selector::field(field.name()),
            field.validity().border_color(),
        ));
    }
}

fn active_link_patches(change: &ActiveChange, out: &mut Vec<DomPatch>) {
    if let Some(previous) = &change.previous {
        out.push(DomPatch::remove_class(selector::nav_link(previous), ACTIVE_CLASS));
    }
    if let Some(current) = &change.current {
        out.push(DomPatch::add_class(selector::nav_link(current), ACTIVE_CLASS));
    }
}

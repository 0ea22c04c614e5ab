//! Create Wizard Component
//!
//! Three-step ticket creation: info → background → QR placement.
//! The form and the composer state live in signals owned here and are handed
//! to each step; session storage is only touched when the wizard mounts and
//! when a step commits its data.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::background_picker::BackgroundPicker;
use super::info_form::{InfoForm, INFO_FORM_ID};
use super::ticket_composer::TicketComposer;
use crate::api::NewTicket;
use crate::composer::ComposerState;
use crate::context::{use_app_context, Page, ToastKind};
use crate::models::FormData;
use crate::session::{load_form_data, save_form_data, BrowserSession};
use crate::wizard::{Wizard, WizardAction, WizardStep};

/// State shared by the wizard steps
#[derive(Clone, Copy)]
pub struct WizardContext {
    pub form: RwSignal<FormData>,
    pub composer: RwSignal<ComposerState>,
}

impl WizardContext {
    /// Fresh composer, form restored from the session if one was saved
    pub fn restore() -> Self {
        let form = load_form_data(&BrowserSession).unwrap_or_default();
        tracing::debug!(title = %form.title, "wizard form restored");
        Self {
            form: RwSignal::new(form),
            composer: RwSignal::new(ComposerState::default()),
        }
    }

    /// Write the form to session storage
    pub fn persist(&self) {
        let Some(form) = self.form.try_get_untracked() else {
            return;
        };
        if let Err(e) = save_form_data(&BrowserSession, &form) {
            tracing::error!(error = %e, "failed to save form data");
        }
    }
}

#[component]
pub fn CreateWizard() -> impl IntoView {
    let ctx = use_app_context();
    let wizard_ctx = WizardContext::restore();
    let wizard = RwSignal::new(Wizard::default());
    let (submitting, set_submitting) = signal(false);

    let step = move || wizard.with(|w| w.step());

    let on_info_submit = move |_| {
        wizard_ctx.persist();
        wizard.update(|w| w.info_submitted());
    };

    let finish = move |image: Vec<u8>| {
        let form = wizard_ctx.form.get_untracked();
        let Some(background_image_id) = form.background_image_id else {
            ctx.notify(ToastKind::Warning, "배경을 먼저 생성해주세요.");
            return;
        };

        set_submitting.set(true);
        spawn_local(async move {
            let ticket = NewTicket {
                image,
                background_image_id,
                shorten_url_id: form.shorten_url_id,
                title: form.title,
            };
            match ctx.api().generate_ticket(ticket).await {
                Ok(created) => {
                    tracing::info!(id = created.id, "ticket created");
                    ctx.notify(ToastKind::Success, "포큐 생성 완료!");
                    ctx.navigate(Page::TicketResult(created.id));
                }
                Err(e) => {
                    tracing::error!(error = %e, "ticket creation failed");
                    ctx.notify(ToastKind::Error, e.user_message());
                }
            }
            set_submitting.try_set(false);
        });
    };

    let primary_button = move || {
        let current = wizard.get();
        let label = current.step().button_text();
        match current.primary_action() {
            WizardAction::SubmitInfoForm => view! {
                <button type="submit" form=INFO_FORM_ID class="primary-btn">{label}</button>
            }
            .into_any(),
            WizardAction::Advance => view! {
                <button type="button" class="primary-btn" on:click=move |_| wizard.update(|w| w.advance())>
                    {label}
                </button>
            }
            .into_any(),
            // The composer owns its own submit button
            WizardAction::Finish => ().into_any(),
        }
    };

    view! {
        <div class="create-wizard">
            <ol class="wizard-steps">
                {WizardStep::ALL.iter().map(move |s| {
                    let s = *s;
                    view! {
                        <li class=move || s.header_class(step())>
                            <span class="step-number">{s.index() + 1}</span>
                            <span class="step-title">{s.title()}</span>
                        </li>
                    }
                }).collect_view()}
            </ol>

            <div class="wizard-content">
                {move || match step() {
                    WizardStep::Info => view! {
                        <InfoForm form=wizard_ctx.form on_submit=on_info_submit />
                    }.into_any(),
                    WizardStep::Background => view! {
                        <BackgroundPicker wizard=wizard_ctx />
                    }.into_any(),
                    WizardStep::Placement => view! {
                        <TicketComposer wizard=wizard_ctx submitting=submitting on_submit=finish />
                    }.into_any(),
                }}
            </div>

            <div class="wizard-buttons">
                <Show when=move || wizard.with(|w| w.shows_prev_button())>
                    <button type="button" class="secondary-btn" on:click=move |_| wizard.update(|w| w.prev())>
                        "이전"
                    </button>
                </Show>
                <Show when=move || wizard.with(|w| w.shows_primary_button())>
                    {primary_button}
                </Show>
            </div>
        </div>
    }
}

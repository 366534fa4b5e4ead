use agency_layout::prelude::*;

use super::{page_root, PageView};
use crate::config::SiteConfig;
use crate::content::FieldDescriptor;
use crate::message::SiteMsg;
use crate::route::Route;

pub const HEADING: &str = "Contact Us";
pub const SUBMIT_LABEL: &str = "Send Message";
pub const FORM_ID: &str = "contact-form";

/// Contact form; submits are intercepted and acknowledged locally
pub struct ContactPage;

impl PageView for ContactPage {
    fn route(&self) -> Route {
        Route::Contact
    }

    fn heading(&self) -> &str {
        HEADING
    }

    fn view(&self, config: &SiteConfig) -> Element<SiteMsg> {
        let stagger_ms = config.motion.stagger_ms;
        let rows = config
            .content
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| field_row(index, field, stagger_ms));

        let submit = MotionProps::new(TransitionPreset::new("submit_button"))
            .while_hover(Pose::scale(1.02))
            .while_tap(Pose::scale(0.98));

        page_root("contact", config)
            .class("container mx-auto px-4 py-12")
            .child(
                heading(1, HEADING)
                    .class("text-4xl font-bold mb-12 text-center")
                    .animate(TransitionPreset::fade_in_up()),
            )
            .child(
                form()
                    .id(FORM_ID)
                    .class("max-w-lg mx-auto space-y-6")
                    .animate(TransitionPreset::scale_up())
                    .on_submit(|event| {
                        event.prevent_default();
                        match &event.data {
                            EventData::Submit { fields } => Some(SiteMsg::Submitted {
                                fields: fields.clone(),
                            }),
                            _ => None,
                        }
                    })
                    .children(rows)
                    .child(
                        submit_button(SUBMIT_LABEL)
                            .class("w-full bg-blue-600 text-white py-3 rounded-lg font-semibold")
                            .motion(submit),
                    ),
            )
    }
}

fn field_row(index: usize, field: &FieldDescriptor, stagger_ms: u32) -> Element<SiteMsg> {
    let label_text = field.label.clone();
    let class = if field.kind == InputKind::Textarea {
        "w-full p-2 border rounded-lg h-32"
    } else {
        "w-full p-2 border rounded-lg"
    };

    div()
        .key(field.label.clone())
        .animate(TransitionPreset::slide_from_left(index, stagger_ms))
        .child(label(field.label.clone()).class("block text-gray-700 mb-2"))
        .child(
            input(field.name(), field.kind)
                .class(class)
                .required(field.required)
                .on(event_types::INVALID, move |event| match &event.data {
                    EventData::Invalid { reason } => Some(SiteMsg::Invalid {
                        field: label_text.clone(),
                        reason: reason.clone(),
                    }),
                    _ => None,
                }),
        )
}

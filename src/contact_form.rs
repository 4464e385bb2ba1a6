// Browser side of the contact form: reads the fields, posts the payload with
// fetch, and mirrors the controller's state onto the button and status line.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Headers, HtmlButtonElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, Request, RequestInit, RequestMode,
};

use crate::config::SiteConfig;
use crate::contact::{
    ContactFields, ContactSubmission, StatusView, SubmissionController, SubmitOutcome,
};
use crate::error::Result;
use crate::utils;

const FIELD_IDS: [&str; 5] = ["nombre", "email", "telefono", "servicio", "mensaje"];

/// POSTs `body` as JSON in no-cors mode. Resolves once the request went out;
/// the response is opaque and never read.
pub async fn post_json(endpoint: &str, body: &str) -> Result<()> {
    let window = utils::window()?;
    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::NoCors);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(endpoint, &init)?;
    JsFuture::from(window.fetch_with_request(&request)).await?;
    Ok(())
}

// input, select and textarea all carry `value`; anything else reads as empty
fn field_value(document: &Document, id: &str) -> String {
    let element = match document.get_element_by_id(id) {
        Some(element) => element,
        None => return String::new(),
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn read_fields(document: &Document) -> ContactFields {
    let [name, email, phone, service, message] = FIELD_IDS;
    ContactFields {
        name: field_value(document, name),
        email: field_value(document, email),
        phone: field_value(document, phone),
        service: field_value(document, service),
        message: field_value(document, message),
    }
}

pub struct ContactForm {
    form: HtmlFormElement,
    button: HtmlButtonElement,
    button_text: Option<Element>,
    button_loading: Option<Element>,
    status: Element,
    controller: SubmissionController,
}

impl ContactForm {
    /// Binds to the form elements, None if any of them is missing.
    pub fn bind(document: &Document, config: &SiteConfig) -> Option<Self> {
        let config = &config.contact;
        let form = utils::element_by_id::<HtmlFormElement>(document, &config.form_id)?;
        let button = utils::element_by_id::<HtmlButtonElement>(document, &config.submit_id)?;
        let status = document.get_element_by_id(&config.status_id)?;
        let button_text = button.query_selector(".btn-text").ok().flatten();
        let button_loading = button.query_selector(".btn-loading").ok().flatten();
        Some(ContactForm {
            form,
            button,
            button_text,
            button_loading,
            status,
            controller: SubmissionController::new(config.clone()),
        })
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    // Every step runs even if an earlier one threw; the first error is returned.
    fn show_loading(&self, loading: bool) -> Result<()> {
        self.button.set_disabled(loading);
        let mut toggles = Vec::with_capacity(3);
        if let Some(text) = &self.button_text {
            toggles.push(text.class_list().toggle_with_force("hidden", loading));
        }
        if let Some(spinner) = &self.button_loading {
            toggles.push(spinner.class_list().toggle_with_force("hidden", !loading));
            toggles.push(spinner.class_list().toggle_with_force("flex", loading));
        }
        toggles.into_iter().collect::<std::result::Result<Vec<bool>, JsValue>>()?;
        Ok(())
    }

    /// Moves to `Submitting`. False when a submission is already in flight.
    pub fn begin(&mut self) -> Result<bool> {
        if !self.controller.begin() {
            return Ok(false);
        }
        self.show_loading(true)?;
        Ok(true)
    }

    /// Settles a submission: status line, optional reset, button restored,
    /// and the status hidden again after the configured delay.
    pub fn finish(&mut self, outcome: SubmitOutcome) -> Result<StatusView> {
        let view = self.controller.finish(outcome);
        self.status.set_text_content(Some(&view.text));
        self.status.set_class_name(&view.class_name);
        if view.clear_fields {
            self.form.reset();
        }
        let restored = self.show_loading(false);

        let status = self.status.clone();
        let hide_scheduled = utils::set_timeout(view.hide_after_ms, move || {
            if let Err(e) = status.class_list().add_1("hidden") {
                log::warn!("could not hide form status: {:?}", e);
            }
        });
        restored?;
        hide_scheduled?;
        Ok(view)
    }
}

async fn submit(form: Rc<RefCell<ContactForm>>, submission: ContactSubmission) {
    let endpoint = form.borrow().controller().endpoint().to_owned();
    let result = match submission.to_json() {
        Ok(body) => post_json(&endpoint, &body).await,
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        log::warn!("contact submission failed: {}", e);
    }
    let outcome = SubmitOutcome::from_result(&result);
    if let Err(e) = form.borrow_mut().finish(outcome) {
        log::error!("contact form cleanup failed: {}", e);
    }
}

pub fn attach(document: &Document, config: &SiteConfig) -> Result<bool> {
    let contact_form = match ContactForm::bind(document, config) {
        Some(contact_form) => contact_form,
        None => {
            log::debug!("no #{}, contact form disabled", config.contact.form_id);
            return Ok(false);
        }
    };
    let form_element = contact_form.form.clone();
    let contact_form = Rc::new(RefCell::new(contact_form));
    let document = document.clone();

    utils::listen(&form_element, "submit", move |event| {
        event.prevent_default();
        match contact_form.borrow_mut().begin() {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                log::warn!("could not show submit progress: {}", e);
            }
        }
        let submission = ContactSubmission::now(read_fields(&document));
        spawn_local(submit(contact_form.clone(), submission));
    })?;
    Ok(true)
}

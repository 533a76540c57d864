use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_post = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_post, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {hx_post:?}"
    );
}

/// Find the element `tag` with `name` in `form`, panicking if there is none.
#[track_caller]
fn must_get_named_element<'a>(form: &ElementRef<'a>, tag: &str, name: &str) -> ElementRef<'a> {
    let selector = Selector::parse(&format!("{tag}[name=\"{name}\"]")).unwrap();

    form.select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No {tag} found with name \"{name}\""))
}

#[track_caller]
fn assert_required(element: &ElementRef<'_>, name: &str) {
    assert!(
        element.value().attr("required").is_some(),
        "want {name} to have the required attribute but got none"
    );
}

#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = must_get_named_element(form, "input", name);
    let input_type = input.value().attr("type").unwrap_or_default();

    assert_eq!(
        input_type, type_,
        "want input {name} with type \"{type_}\", got {input_type:?}"
    );
    assert_required(&input, name);
}

#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    assert_form_input(form, name, type_);

    let input = must_get_named_element(form, "input", name);
    let input_value = input.value().attr("value").unwrap_or_default();

    assert_eq!(
        input_value, value,
        "want input {name} with value \"{value}\", got {input_value:?}"
    );
}

/// Assert that `form` has an optional textarea called `name`.
#[track_caller]
pub(crate) fn assert_form_textarea(form: &ElementRef<'_>, name: &str) {
    let textarea = must_get_named_element(form, "textarea", name);

    assert!(
        textarea.value().attr("required").is_none(),
        "want textarea {name} to be optional"
    );
}

/// Assert that `form` has a required select called `name` with exactly the
/// `(value, text)` pairs in `want_options`, in order.
#[track_caller]
pub(crate) fn assert_form_select(
    form: &ElementRef<'_>,
    name: &str,
    want_options: &[(&str, &str)],
) {
    let select = must_get_named_element(form, "select", name);
    assert_required(&select, name);

    let got_options = select
        .select(&Selector::parse("option").unwrap())
        .map(|option| {
            (
                option.value().attr("value").unwrap_or_default().to_owned(),
                option.text().collect::<String>().trim().to_owned(),
            )
        })
        .collect::<Vec<_>>();
    let want_options = want_options
        .iter()
        .map(|(value, text)| (value.to_string(), text.to_string()))
        .collect::<Vec<_>>();

    assert_eq!(got_options, want_options);
}

#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button").unwrap())
        .next()
        .expect("No button found");

    assert_eq!(
        submit_button.value().attr("type").unwrap_or_default(),
        "submit",
        "want submit button with type=\"submit\""
    );
    let got_text = submit_button.text().collect::<String>();
    assert_eq!(text, got_text.trim());
}

#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want_error_message: &str) {
    let error_message = form
        .select(&Selector::parse("p").unwrap())
        .next()
        .expect("No error message found")
        .text()
        .collect::<String>();

    assert_eq!(want_error_message, error_message.trim());
}

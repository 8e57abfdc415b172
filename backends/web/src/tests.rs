use listfilter::{FilterError, MissingLabelPolicy};
use pretty_assertions::assert_eq;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::{Event, HtmlElement, HtmlInputElement};

use crate::{
    WebError, WebFilterBuilder, dom::document, install_list_filter, install_list_filter_with_config,
};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

const CATALOGUE: &str = r#"
<input id="search-input">
<ul id="product-list">
  <li class="product-item"><a href="/product/1">Red Shirt</a></li>
  <li class="product-item"><a href="/product/2">Blue Jeans</a></li>
  <li class="product-item"><a href="/product/3">red hat</a></li>
</ul>
"#;

fn mount(markup: &str) {
    let body = document().unwrap().body().unwrap();
    body.set_inner_html(markup);
}

fn type_query(value: &str) {
    type_into("search-input", value);
}

fn type_into(input_id: &str, value: &str) {
    let input: HtmlInputElement = document()
        .unwrap()
        .get_element_by_id(input_id)
        .unwrap()
        .dyn_into()
        .unwrap();
    input.set_value(value);
    input
        .dispatch_event(&Event::new("input").unwrap())
        .unwrap();
}

fn displays() -> Vec<String> {
    displays_of("product-item")
}

fn displays_of(item_class: &str) -> Vec<String> {
    let items = document().unwrap().get_elements_by_class_name(item_class);
    (0..items.length())
        .filter_map(|index| items.item(index))
        .map(|item| {
            item.dyn_into::<HtmlElement>()
                .unwrap()
                .style()
                .get_property_value("display")
                .unwrap()
        })
        .collect()
}

#[wasm_bindgen_test]
fn typing_hides_non_matching_items() {
    mount(CATALOGUE);
    let filter = WebFilterBuilder::new().attach().unwrap();

    type_query("red");
    assert_eq!(displays(), ["", "none", ""]);

    type_query("BLUE");
    assert_eq!(displays(), ["none", "", "none"]);

    type_query("");
    assert_eq!(displays(), ["", "", ""]);
    assert_eq!(filter.visible_count(), 3);
}

#[wasm_bindgen_test]
fn items_added_after_setup_are_ignored() {
    mount(CATALOGUE);
    let filter = WebFilterBuilder::new().attach().unwrap();
    let list = document().unwrap().get_element_by_id("product-list").unwrap();
    list.insert_adjacent_html(
        "beforeend",
        r#"<li class="product-item"><a>Green Socks</a></li>"#,
    )
    .unwrap();

    type_query("xyz");
    assert_eq!(displays(), ["none", "none", "none", ""]);
    assert_eq!(filter.len(), 3);
}

#[wasm_bindgen_test]
fn dropping_the_handle_detaches() {
    mount(CATALOGUE);
    drop(WebFilterBuilder::new().attach().unwrap());
    type_query("shirt");
    assert_eq!(displays(), ["", "", ""]);
}

#[wasm_bindgen_test]
fn missing_input_is_reported() {
    mount(r#"<ul id="product-list"></ul>"#);
    let error = WebFilterBuilder::new().attach().unwrap_err();
    assert_eq!(
        error,
        WebError::ElementNotFound {
            role: "search input",
            id: "search-input".into(),
        }
    );
}

#[wasm_bindgen_test]
fn initial_input_value_is_applied_at_setup() {
    let restored = CATALOGUE.replace(
        r#"<input id="search-input">"#,
        r#"<input id="search-input" value="blue">"#,
    );
    mount(&restored);
    let filter = WebFilterBuilder::new().attach().unwrap();
    assert_eq!(displays(), ["none", "", "none"]);
    assert_eq!(filter.visible_count(), 1);
}

#[wasm_bindgen_test]
fn custom_markup_and_fail_policy() {
    mount(
        r#"
        <input id="q">
        <div id="rows">
          <p class="row"><span>Red Shirt</span></p>
          <p class="row">no label</p>
        </div>
        "#,
    );
    let error = WebFilterBuilder::new()
        .with_input_id("q")
        .with_container_id("rows")
        .with_item_class("row")
        .with_label_tag("span")
        .missing_label(MissingLabelPolicy::Fail)
        .attach()
        .unwrap_err();

    assert_eq!(error, WebError::Filter(FilterError::MissingLabel { index: 1 }));
    assert_eq!(displays_of("row"), ["", ""]);
    // Setup failed, so no listener was registered.
    type_into("q", "xyz");
    assert_eq!(displays_of("row"), ["", ""]);
}

#[wasm_bindgen_test]
fn install_entry_point_filters_the_catalogue() {
    mount(CATALOGUE);
    install_list_filter().unwrap();

    type_query("shirt");
    assert_eq!(displays(), ["", "none", "none"]);
}

#[wasm_bindgen_test]
fn install_with_json_config_uses_custom_ids() {
    mount(
        r#"
        <input id="q">
        <div id="rows">
          <p class="row"><span>Red Shirt</span></p>
          <p class="row"><span>Blue Jeans</span></p>
        </div>
        "#,
    );
    install_list_filter_with_config(
        r#"{"inputId":"q","containerId":"rows","itemClass":"row","labelTag":"span"}"#,
    )
    .unwrap();

    type_into("q", "JEANS");
    assert_eq!(displays_of("row"), ["none", ""]);
}

#[wasm_bindgen_test]
fn install_rejects_invalid_json() {
    mount(CATALOGUE);
    let error = install_list_filter_with_config("{not json").unwrap_err();
    assert!(matches!(error, WebError::InvalidConfig(_)));
}

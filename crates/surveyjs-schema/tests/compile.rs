use serde_json::{Value, json};

use surveyjs_schema::{CompileOptions, Layout, SurveyDefinition, compile};

fn fixture(name: &str) -> &'static str {
    match name {
        "single_choice" => include_str!("../tests/fixtures/single_choice.json"),
        "multilingual" => include_str!("../tests/fixtures/multilingual.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

fn survey(name: &str) -> SurveyDefinition {
    SurveyDefinition::from_json_str(fixture(name)).expect("deserialize")
}

fn compiled(name: &str, options: &CompileOptions) -> Value {
    compile(&survey(name), options).to_value()
}

#[test]
fn single_choice_survey_compiles_to_one_radiogroup() {
    let doc = compiled("single_choice", &CompileOptions::default().with_filters(true));

    assert_eq!(
        doc,
        json!({
            "locale": "en",
            "defaultLocale": "en",
            "pages": [
                {
                    "name": "Basics",
                    "elements": [
                        {
                            "name": "Q1",
                            "title": { "default": "Pick one", "en": "Pick one" },
                            "isRequired": true,
                            "type": "radiogroup",
                            "hasOther": true,
                            "choices": [
                                { "value": "A1", "text": { "default": "First", "en": "First" } },
                                { "value": "A2", "text": { "default": "Second", "en": "Second" } }
                            ]
                        }
                    ]
                }
            ]
        })
    );
}

#[test]
fn compiling_twice_is_byte_identical() {
    let survey = survey("multilingual");
    let options = CompileOptions::default().with_filters(true);
    assert_eq!(
        compile(&survey, &options).to_json(),
        compile(&survey, &options).to_json()
    );
    assert_eq!(
        compile(&survey, &options).to_json_pretty(),
        compile(&survey, &options).to_json_pretty()
    );
}

#[test]
fn compact_and_pretty_output_describe_the_same_document() {
    let doc = compile(&survey("multilingual"), &CompileOptions::default());
    let compact: Value = serde_json::from_str(&doc.to_json()).expect("compact json");
    let pretty: Value = serde_json::from_str(&doc.to_json_pretty()).expect("pretty json");
    assert_eq!(compact, pretty);
    assert!(!doc.to_json().contains('\n'));
    assert!(doc.to_json_pretty().contains('\n'));
}

#[test]
fn single_language_survey_has_no_language_page() {
    let doc = compiled("single_choice", &CompileOptions::default());
    let pages = doc["pages"].as_array().expect("pages");
    assert_eq!(pages.len(), 1);
    assert!(pages.iter().all(|page| page["name"] != "language"));
}

#[test]
fn multilingual_survey_starts_with_language_page() {
    let doc = compiled("multilingual", &CompileOptions::default());
    let pages = doc["pages"].as_array().expect("pages");
    assert_eq!(pages.len(), 3);
    assert_eq!(pages.iter().filter(|page| page["name"] == "language").count(), 1);

    let picker = &pages[0]["elements"][0];
    assert_eq!(picker["name"], "language");
    assert_eq!(picker["type"], "radiogroup");
    assert_eq!(picker["isRequired"], true);
    assert_eq!(picker["hideNumber"], true);
    assert!(picker.get("hasOther").is_none());
    assert_eq!(
        picker["choices"],
        json!([
            { "value": "en", "text": "en" },
            { "value": "de", "text": "de" }
        ])
    );
    assert_eq!(picker["title"]["default"], "What is your preferred language?");
    assert_eq!(picker["title"]["de"], "Welche Sprache bevorzugen Sie?");
}

#[test]
fn language_page_can_be_switched_off() {
    let doc = compiled(
        "multilingual",
        &CompileOptions::default().with_language_page(false),
    );
    assert_eq!(doc["pages"][0]["name"], "Household");
}

#[test]
fn pages_follow_groups_and_skip_subquestion_rows() {
    let doc = compiled("multilingual", &CompileOptions::default());
    let household = &doc["pages"][1];
    assert_eq!(household["name"], "Household");
    let names = household["elements"]
        .as_array()
        .expect("elements")
        .iter()
        .map(|element| element["name"].as_str().expect("name"))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Q1", "Q10", "RATE", "USE"]);
    assert_eq!(doc["pages"][2]["name"], "Feedback");
}

#[test]
fn element_types_follow_question_types() {
    let doc = compiled("multilingual", &CompileOptions::default());
    let household = &doc["pages"][1]["elements"];
    assert_eq!(household[0]["type"], "radiogroup");
    assert_eq!(household[1]["type"], "text");
    assert_eq!(household[1]["inputType"], "number");
    assert_eq!(household[1]["validators"], json!([{ "type": "numeric" }]));
    assert_eq!(household[2]["type"], "matrix");
    assert_eq!(household[3]["type"], "checkbox");

    let feedback = &doc["pages"][2]["elements"];
    assert_eq!(feedback[0]["type"], "dropdown");
    assert!(feedback[0].get("hasOther").is_none());
    assert_eq!(feedback[1]["type"], "text");
    assert!(feedback[1].get("inputType").is_none());
    assert!(feedback[1].get("validators").is_none());
}

#[test]
fn choice_values_are_numeric_when_whole() {
    let doc = compiled("multilingual", &CompileOptions::default());
    let choices = &doc["pages"][1]["elements"][0]["choices"];
    assert_eq!(choices[0]["value"], json!(1));
    assert_eq!(choices[1]["value"], json!(2));
    assert_eq!(choices[2]["value"], json!("9a"));
    assert_eq!(
        choices[2]["text"],
        json!({ "default": "Unsure", "en": "Unsure" })
    );

    let brand = &doc["pages"][2]["elements"][0]["choices"];
    assert_eq!(brand[0]["value"], json!("vw"));
    assert_eq!(brand[1]["value"], json!(3));
}

#[test]
fn titles_carry_every_available_translation() {
    let doc = compiled("multilingual", &CompileOptions::default());
    let q1 = &doc["pages"][1]["elements"][0];
    assert_eq!(
        q1["title"],
        json!({
            "default": "Do you own a car?",
            "en": "Do you own a car?",
            "de": "Haben Sie ein Auto?"
        })
    );
    let q10 = &doc["pages"][1]["elements"][1];
    assert_eq!(
        q10["title"],
        json!({ "default": "How many cars?", "en": "How many cars?" })
    );
}

#[test]
fn matrix_uses_answers_as_columns_and_subquestions_as_rows() {
    let doc = compiled("multilingual", &CompileOptions::default());
    let matrix = &doc["pages"][1]["elements"][2];
    assert_eq!(matrix["columnMinWidth"], "200px");
    assert_eq!(
        matrix["columns"],
        json!([
            { "value": "1", "text": { "default": "Bad", "en": "Bad", "de": "Schlecht" }, "maxWidth": "1%" },
            { "value": "2", "text": { "default": "Good", "en": "Good", "de": "Gut" }, "maxWidth": "1%" }
        ])
    );
    assert_eq!(
        matrix["rows"],
        json!([
            { "value": "SQ001", "text": { "default": "Comfort", "en": "Comfort", "de": "Komfort" } },
            { "value": "SQ002", "text": { "default": "Price", "en": "Price" } }
        ])
    );
}

#[test]
fn checkbox_choices_come_from_subquestions() {
    let doc = compiled("multilingual", &CompileOptions::default());
    let checkbox = &doc["pages"][1]["elements"][3];
    assert_eq!(
        checkbox["choices"],
        json!([
            { "value": 1, "text": { "default": "Work", "en": "Work", "de": "Arbeit" } },
            { "value": 1, "text": { "default": "Leisure", "en": "Leisure", "de": "Freizeit" } }
        ])
    );
}

#[test]
fn filters_disabled_emit_no_conditions() {
    let doc = compiled("multilingual", &CompileOptions::default());
    for page in doc["pages"].as_array().expect("pages") {
        for element in page["elements"].as_array().expect("elements") {
            assert!(element.get("visibleIf").is_none());
            assert!(element.get("description").is_none());
        }
    }
}

#[test]
fn filters_enabled_translate_relevance() {
    let doc = compiled("multilingual", &CompileOptions::default().with_filters(true));
    let household = &doc["pages"][1]["elements"];

    assert!(household[0].get("visibleIf").is_none());
    assert!(household[0].get("description").is_none());

    assert_eq!(household[1]["visibleIf"], "{Q1} = '1'");
    assert_eq!(household[1]["description"], "{Q1} = '1'");
    assert_eq!(household[2]["visibleIf"], "{Q10} > 1 and ({Q10})");
    assert_eq!(household[3]["visibleIf"], "{RATE_SQ001} = '2'");

    let feedback = &doc["pages"][2]["elements"];
    assert_eq!(feedback[1]["visibleIf"], "{BRAND} = '3'");
}

#[test]
fn free_text_is_sanitized() {
    let doc = compiled("multilingual", &CompileOptions::default());
    assert_eq!(doc["pages"][1]["name"], "Household");
    assert_eq!(doc["pages"][2]["name"], "Feedback");
    assert_eq!(
        doc["pages"][1]["elements"][1]["title"]["default"],
        "How many cars?"
    );
    assert_eq!(
        doc["pages"][2]["elements"][1]["title"]["en"],
        "Anything else?Tell us."
    );
}

#[test]
fn flat_layout_lists_questions_after_the_language_picker() {
    let doc = compiled(
        "multilingual",
        &CompileOptions::default().with_layout(Layout::Flat),
    );
    assert!(doc.get("pages").is_none());
    let names = doc["questions"]
        .as_array()
        .expect("questions")
        .iter()
        .map(|element| element["name"].as_str().expect("name"))
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["language", "Q1", "Q10", "RATE", "USE", "BRAND", "NOTES"]
    );
}

#[test]
fn missing_default_translation_falls_back_to_empty_text() {
    let survey = SurveyDefinition::from_json_str(
        r#"{
            "id": 1,
            "language": "en",
            "languages": ["en", "et"],
            "groups": [{ "id": 1, "name": "G", "questions": [
                { "id": 1, "name": "ONLY_ET", "type": "S", "translations": { "et": "Nimi" } }
            ]}]
        }"#,
    )
    .expect("deserialize");
    let doc = compile(&survey, &CompileOptions::default()).to_value();
    assert_eq!(
        doc["pages"][1]["elements"][0]["title"],
        json!({ "default": "", "et": "Nimi" })
    );
}

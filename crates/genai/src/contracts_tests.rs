// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::validate_response_schema;

#[test]
fn summary_contract_passes_validation() {
    validate_response_schema(&lecture_summary_schema()).unwrap();
}

#[test]
fn quiz_contract_passes_validation() {
    validate_response_schema(&quiz_set_schema()).unwrap();
}

#[test]
fn quiz_contract_pins_item_count() {
    let schema = quiz_set_schema();
    let items = &schema["properties"]["items"];
    assert_eq!(items["minItems"], QUIZ_ITEM_COUNT);
    assert_eq!(items["maxItems"], QUIZ_ITEM_COUNT);
    assert_eq!(items["items"]["properties"]["options"]["minItems"], 4);
}

#[test]
fn summary_contract_expresses_nullability_without_type_unions() {
    let schema = lecture_summary_schema();
    let source = &schema["properties"]["meta"]["properties"]["source"]["properties"];
    assert_eq!(source["pdfFileId"]["nullable"], true);
    assert_eq!(source["pdfFileId"]["type"], "string");
}

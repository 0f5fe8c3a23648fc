// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Response contracts for the production job types.
//!
//! Written natively in the restricted dialect: nullability uses the
//! `nullable` flag, and no blocked keys appear, so both documents always
//! pass [`crate::validate_response_schema`].

use serde_json::{json, Value};

/// Number of questions a quiz generation must return.
pub const QUIZ_ITEM_COUNT: u64 = 20;

/// Contract for a lecture summary payload.
pub fn lecture_summary_schema() -> Value {
    json!({
        "title": "LectureSummary",
        "type": "object",
        "required": ["meta", "highlights", "memorization", "concepts"],
        "properties": {
            "meta": {
                "type": "object",
                "required": ["lectureId", "title", "language", "source"],
                "properties": {
                    "lectureId": { "type": "string" },
                    "title": { "type": "string" },
                    "language": {
                        "type": "string",
                        "description": "ISO 639-1/2 language code, e.g. \"ko\"."
                    },
                    "source": {
                        "type": "object",
                        "properties": {
                            "pdfFileId": { "type": "string", "nullable": true },
                            "transcriptFileId": { "type": "string", "nullable": true },
                            "pages": {
                                "type": "array",
                                "nullable": true,
                                "items": { "type": "integer", "minimum": 1 }
                            }
                        }
                    }
                }
            },
            "highlights": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["point", "why", "sourceMap"],
                    "properties": {
                        "point": { "type": "string" },
                        "why": { "type": "string" },
                        "sourceMap": {
                            "type": "object",
                            "required": ["pdfPages", "timestamps"],
                            "properties": {
                                "pdfPages": {
                                    "type": "array",
                                    "items": { "type": "integer", "minimum": 0 },
                                    "default": []
                                },
                                "timestamps": {
                                    "type": "array",
                                    "default": [],
                                    "items": {
                                        "type": "string",
                                        "description": "HH:MM:SS or HH:MM:SS.mmm offsets."
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "memorization": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["fact", "mnemonic"],
                    "properties": {
                        "fact": { "type": "string" },
                        "mnemonic": { "type": "string" }
                    }
                }
            },
            "concepts": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["concept", "explanation", "relatedFigures"],
                    "properties": {
                        "concept": { "type": "string" },
                        "explanation": { "type": "string" },
                        "relatedFigures": {
                            "type": "array",
                            "items": { "type": "string" },
                            "default": []
                        }
                    }
                }
            },
            "quizSeeds": {
                "type": "array",
                "default": [],
                "items": {
                    "type": "object",
                    "required": ["topic", "difficulty", "pitfalls"],
                    "properties": {
                        "topic": { "type": "string" },
                        "difficulty": {
                            "type": "string",
                            "enum": ["easy", "medium", "hard"]
                        },
                        "pitfalls": {
                            "type": "array",
                            "items": { "type": "string" },
                            "default": []
                        }
                    }
                }
            }
        }
    })
}

/// Contract for a generated quiz set.
pub fn quiz_set_schema() -> Value {
    json!({
        "title": "QuizSet",
        "type": "object",
        "required": ["lectureId", "items"],
        "properties": {
            "lectureId": { "type": "string" },
            "items": {
                "type": "array",
                "minItems": QUIZ_ITEM_COUNT,
                "maxItems": QUIZ_ITEM_COUNT,
                "items": {
                    "type": "object",
                    "required": [
                        "qid",
                        "stem",
                        "options",
                        "answer",
                        "rationale",
                        "difficulty",
                        "tags",
                        "sourceRef"
                    ],
                    "propertyOrdering": [
                        "qid",
                        "stem",
                        "options",
                        "answer",
                        "rationale",
                        "difficulty",
                        "tags",
                        "sourceRef"
                    ],
                    "properties": {
                        "qid": { "type": "string" },
                        "stem": { "type": "string", "minLength": 8 },
                        "options": {
                            "type": "array",
                            "minItems": 4,
                            "maxItems": 4,
                            "items": { "type": "string", "minLength": 1 }
                        },
                        "answer": { "type": "integer", "minimum": 0, "maximum": 3 },
                        "rationale": { "type": "string" },
                        "difficulty": {
                            "type": "string",
                            "enum": ["easy", "medium", "hard"]
                        },
                        "tags": {
                            "type": "array",
                            "items": { "type": "string" }
                        },
                        "sourceRef": {
                            "type": "object",
                            "properties": {
                                "pdfPages": {
                                    "type": "array",
                                    "items": { "type": "integer", "minimum": 1 }
                                },
                                "timestamps": {
                                    "type": "array",
                                    "items": { "type": "string" }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
#[path = "contracts_tests.rs"]
mod tests;

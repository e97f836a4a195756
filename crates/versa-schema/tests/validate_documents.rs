//! # Document Validation Tests
//!
//! End-to-end validation of realistic VERSA documents through the
//! process-wide engine. Covers the three documents most projects carry
//! (context, profile, agents) and the multi-document setups they form.

use serde_json::{json, Value};
use versa_schema::{validate_agent, validate_context, validate_profile, ValidationResult};

fn assert_valid(result: &ValidationResult) {
    assert!(result.is_valid(), "expected valid, got:\n{result}");
    assert!(result.errors().is_empty());
}

fn assert_invalid_with(result: &ValidationResult, keyword: &str) {
    assert!(!result.is_valid(), "expected a {keyword} violation, document was valid");
    assert!(
        result.has_keyword(keyword),
        "expected a {keyword} violation, got:\n{result}"
    );
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

fn full_context() -> Value {
    json!({
        "version": "1.0",
        "metadata": {
            "name": "My Project",
            "description": "A test project",
            "tags": ["typescript", "versa"],
            "author": "Alphin Tom",
            "created": "2025-10-17",
            "license": "MIT"
        },
        "rules": ["rules/style.md", "rules/security.md"],
        "context": ["src/**/*.ts", "docs/**/*.md"],
        "agents": ["agents/reviewer.json"],
        "prompts": ["prompts/bug-report.md"],
        "tools": ["tools/mcp-servers.json"],
        "knowledge": ["knowledge/sources.json"],
        "settings": {
            "model": "claude-sonnet-4",
            "temperature": 0.7,
            "maxTokens": 4096,
            "topP": 1.0,
            "streaming": true
        },
        "permissions": {
            "files": {
                "read": ["src/**", "docs/**"],
                "write": ["src/**"],
                "deny": ["*.key", "*.pem", ".env*"]
            },
            "network": {
                "allow": ["https://api.anthropic.com"],
                "deny": ["*"]
            },
            "commands": {
                "allow": ["npm test", "git status"],
                "deny": ["rm -rf", "sudo"]
            },
            "secrets": {
                "bindings": { "OPENAI_API_KEY": "env:OPENAI_API_KEY" }
            }
        }
    })
}

#[test]
fn context_minimal_is_valid() {
    assert_valid(&validate_context(&json!({ "version": "1.0" })));
}

#[test]
fn context_full_featured_is_valid() {
    assert_valid(&validate_context(&full_context()));
}

#[test]
fn context_optional_fields_and_empty_arrays_are_valid() {
    assert_valid(&validate_context(&json!({
        "version": "1.0",
        "metadata": { "name": "Test", "tags": ["test"] },
        "rules": [],
        "context": [],
        "agents": [],
        "prompts": [],
        "tools": [],
        "knowledge": []
    })));
}

#[test]
fn context_missing_version_is_reported_first() {
    let result = validate_context(&json!({ "rules": ["rules/style.md"] }));
    assert!(!result.is_valid());
    let first = &result.errors()[0];
    assert_eq!(first.keyword, "required");
    assert_eq!(first.instance_path, "/");
    assert_eq!(first.params["missingProperty"], "version");
}

#[test]
fn context_unsupported_version_is_rejected() {
    assert_invalid_with(&validate_context(&json!({ "version": "2.0" })), "enum");
}

#[test]
fn context_version_must_be_a_string() {
    assert_invalid_with(&validate_context(&json!({ "version": 1.0 })), "type");
}

#[test]
fn context_temperature_above_range_is_rejected() {
    let result = validate_context(&json!({ "version": "1.0", "settings": { "temperature": 3.0 } }));
    assert_invalid_with(&result, "maximum");
}

#[test]
fn context_temperature_bounds_are_inclusive() {
    for temperature in [0.0, 2.0] {
        let result = validate_context(&json!({
            "version": "1.0",
            "settings": { "temperature": temperature }
        }));
        assert_valid(&result);
    }
}

#[test]
fn context_top_p_above_one_is_rejected() {
    let result = validate_context(&json!({ "version": "1.0", "settings": { "topP": 1.5 } }));
    assert_invalid_with(&result, "maximum");
}

#[test]
fn context_negative_max_tokens_is_rejected() {
    let result = validate_context(&json!({ "version": "1.0", "settings": { "maxTokens": -100 } }));
    assert_invalid_with(&result, "minimum");
}

#[test]
fn context_fractional_max_tokens_is_rejected() {
    let result = validate_context(&json!({ "version": "1.0", "settings": { "maxTokens": 10.5 } }));
    assert_invalid_with(&result, "type");
}

#[test]
fn context_unknown_top_level_field_is_rejected() {
    let result = validate_context(&json!({ "version": "1.0", "unknownField": "should not be here" }));
    assert_invalid_with(&result, "additionalProperties");
    let error = result
        .errors()
        .iter()
        .find(|e| e.keyword == "additionalProperties")
        .unwrap();
    assert_eq!(error.params["additionalProperty"], "unknownField");
}

#[test]
fn context_settings_are_closed() {
    let result = validate_context(&json!({
        "version": "1.0",
        "settings": { "theme": "dark" }
    }));
    assert_invalid_with(&result, "additionalProperties");
}

#[test]
fn context_wrong_container_type_has_a_message() {
    let result = validate_context(&json!({ "version": "1.0", "rules": "should-be-array" }));
    let error = result.errors().iter().find(|e| e.keyword == "type").unwrap();
    assert_eq!(error.instance_path, "/rules");
    assert!(error.message.as_deref().is_some_and(|m| !m.is_empty()));
}

#[test]
fn context_errors_carry_the_full_error_shape() {
    let result = validate_context(&json!({ "version": "1.0", "settings": { "temperature": 5.0 } }));
    let error = &result.errors()[0];
    let value = serde_json::to_value(error).unwrap();
    for field in ["instancePath", "schemaPath", "keyword", "params", "message"] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
}

#[test]
fn context_path_traversal_in_rule_is_rejected() {
    let result = validate_context(&json!({ "version": "1.0", "rules": ["../etc/passwd"] }));
    assert_invalid_with(&result, "format");
    assert_eq!(result.errors()[0].instance_path, "/rules/0");
}

#[test]
fn context_absolute_and_windows_paths_are_rejected() {
    for path in ["/abs/rule.md", "rules\\style.md", ""] {
        let result = validate_context(&json!({ "version": "1.0", "agents": [path] }));
        assert_invalid_with(&result, "format");
    }
}

#[test]
fn context_unbalanced_glob_is_rejected() {
    let result = validate_context(&json!({ "version": "1.0", "context": ["src/{a,b"] }));
    assert_invalid_with(&result, "format");
    let result = validate_context(&json!({
        "version": "1.0",
        "permissions": { "files": { "deny": ["secrets/[a-z"] } }
    }));
    assert_invalid_with(&result, "format");
}

#[test]
fn context_bad_model_name_is_rejected() {
    let result = validate_context(&json!({ "version": "1.0", "settings": { "model": "-leading-dash" } }));
    assert_invalid_with(&result, "format");
}

#[test]
fn context_bad_date_is_rejected() {
    let result = validate_context(&json!({ "version": "1.0", "metadata": { "created": "17/10/2025" } }));
    assert_invalid_with(&result, "format");
}

#[test]
fn context_network_allow_accepts_host_patterns() {
    let network = json!({
        "allow": ["*.github.com", "api.anthropic.com", "https://registry.npmjs.org"],
        "deny": ["*"]
    });
    assert_valid(&versa_schema::validate_permissions(&json!({ "network": network })));
    assert_valid(&validate_context(&json!({
        "version": "1.0",
        "permissions": { "network": network }
    })));
}

#[test]
fn context_reports_every_violation() {
    let result = validate_context(&json!({
        "version": "1.0",
        "rules": ["../escape.md"],
        "settings": { "temperature": 9, "topP": -1 },
        "extra": true
    }));
    assert!(!result.is_valid());
    assert!(result.errors().len() >= 4, "got:\n{result}");
    for keyword in ["format", "maximum", "minimum", "additionalProperties"] {
        assert!(result.has_keyword(keyword), "missing {keyword}:\n{result}");
    }
}

#[test]
fn context_non_object_inputs_are_invalid_not_errors() {
    for input in [Value::Null, json!(42), json!("context"), json!([]), json!(true)] {
        let result = validate_context(&input);
        assert!(!result.is_valid(), "{input} should be rejected");
        assert!(!result.errors().is_empty());
    }
}

#[test]
fn realistic_typescript_project_is_valid() {
    assert_valid(&validate_context(&json!({
        "version": "1.0",
        "metadata": {
            "name": "TypeScript Project",
            "description": "A modern TypeScript application",
            "tags": ["typescript", "node", "backend"],
            "author": "Alphin Tom",
            "created": "2025-10-17",
            "license": "MIT"
        },
        "rules": ["rules/typescript-style.md", "rules/testing.md", "rules/security.md"],
        "context": ["src/**/*.ts", "tests/**/*.test.ts", "package.json", "tsconfig.json"],
        "agents": ["agents/code-reviewer.json", "agents/documenter.json"],
        "settings": { "model": "claude-sonnet-4", "temperature": 0.7, "maxTokens": 4096 },
        "permissions": {
            "files": {
                "read": ["src/**", "tests/**", "*.json", "*.md"],
                "write": ["src/**", "tests/**"],
                "deny": [".env*", "*.key", "*.pem", "node_modules/**"]
            },
            "network": {
                "allow": ["https://registry.npmjs.org", "https://api.github.com"],
                "deny": ["*"]
            },
            "commands": {
                "allow": ["npm test", "npm run build", "git status", "git diff"],
                "deny": ["rm -rf", "sudo", "dd"]
            }
        }
    })));
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[test]
fn profile_each_merge_strategy_is_valid() {
    assert_valid(&validate_profile(&json!({
        "version": "1.0",
        "merge": "deep",
        "rules": ["rules/cursor-specific.md"]
    })));
    assert_valid(&validate_profile(&json!({
        "version": "1.0",
        "merge": "shallow",
        "context": ["src/**/*.tsx"]
    })));
    assert_valid(&validate_profile(&json!({
        "version": "1.0",
        "merge": "replace",
        "settings": { "model": "gpt-4-turbo" }
    })));
}

#[test]
fn profile_missing_merge_is_rejected() {
    let result = validate_profile(&json!({ "version": "1.0", "rules": ["rules/test.md"] }));
    assert_invalid_with(&result, "required");
    assert_eq!(result.errors()[0].params["missingProperty"], "merge");
}

#[test]
fn profile_unknown_merge_is_rejected() {
    let result = validate_profile(&json!({ "version": "1.0", "merge": "invalid-strategy" }));
    assert_invalid_with(&result, "enum");
}

#[test]
fn profile_with_all_fields_is_valid() {
    assert_valid(&validate_profile(&json!({
        "version": "1.0",
        "merge": "deep",
        "metadata": { "name": "Cursor Profile", "description": "Cursor-specific overrides" },
        "rules": ["rules/cursor.md"],
        "context": ["**/*.tsx"],
        "agents": ["agents/cursor-agent.json"],
        "prompts": ["prompts/cursor-prompt.md"],
        "tools": ["tools/cursor-tools.json"],
        "knowledge": ["knowledge/cursor-docs.json"],
        "settings": { "model": "claude-sonnet-4", "temperature": 0.5, "customField": "allowed" },
        "permissions": { "files": { "read": ["**/*"] } }
    })));
}

#[test]
fn profile_metadata_matches_context_metadata() {
    let metadata = json!({
        "name": "Cursor Profile",
        "description": "Cursor-specific overrides",
        "tags": ["cursor"],
        "author": "Alphin Tom",
        "created": "2025-10-17",
        "updated": "2025-11-02",
        "license": "MIT"
    });
    assert_valid(&validate_context(&json!({ "version": "1.0", "metadata": metadata })));
    assert_valid(&validate_profile(&json!({
        "version": "1.0",
        "merge": "deep",
        "metadata": metadata
    })));

    let result = validate_profile(&json!({
        "version": "1.0",
        "merge": "deep",
        "metadata": { "created": "yesterday" }
    }));
    assert_invalid_with(&result, "format");
    assert_eq!(result.errors()[0].instance_path, "/metadata/created");
}

#[test]
fn profile_settings_accept_tool_specific_keys() {
    assert_valid(&validate_profile(&json!({
        "version": "1.0",
        "merge": "deep",
        "metadata": { "name": "Cursor IDE Profile", "description": "Optimized settings for Cursor" },
        "rules": ["rules/cursor-shortcuts.md"],
        "settings": {
            "temperature": 0.5,
            "shortcuts": {
                "review": "agents/code-reviewer.json",
                "document": "agents/documenter.json",
                "test": "agents/tester.json"
            },
            "sidebar": "expanded",
            "theme": "dark"
        }
    })));
}

#[test]
fn profile_open_settings_still_check_known_keys() {
    let result = validate_profile(&json!({
        "version": "1.0",
        "merge": "deep",
        "settings": { "temperature": 4, "theme": "dark" }
    }));
    assert_invalid_with(&result, "maximum");
}

#[test]
fn profile_top_level_is_closed() {
    let result = validate_profile(&json!({ "version": "1.0", "merge": "deep", "theme": "dark" }));
    assert_invalid_with(&result, "additionalProperties");
}

#[test]
fn profile_can_override_context_fields() {
    assert_valid(&validate_profile(&json!({
        "version": "1.0",
        "merge": "deep",
        "rules": ["new-rule.md"],
        "context": ["additional/**/*.ts"],
        "settings": { "model": "gpt-4-turbo", "temperature": 0.8 },
        "permissions": { "files": { "read": ["docs/**"] } }
    })));
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

#[test]
fn agent_minimal_is_valid() {
    assert_valid(&validate_agent(&json!({ "version": "1.0", "name": "Code Reviewer" })));
}

#[test]
fn agent_full_definition_is_valid() {
    assert_valid(&validate_agent(&json!({
        "version": "1.0",
        "name": "Security-Focused Code Reviewer",
        "description": "Reviews code with emphasis on security vulnerabilities",
        "model": "claude-sonnet-4",
        "temperature": 0.3,
        "maxTokens": 8192,
        "rules": [
            "rules/security-checklist.md",
            "rules/owasp-top-10.md",
            "rules/code-quality.md"
        ],
        "tools": ["tools/linter.json", "tools/security-scanner.json"],
        "systemPrompt": "You are an expert security-focused code reviewer.\n\nBe thorough but constructive.",
        "capabilities": [
            "code-review",
            "security-audit",
            "vulnerability-detection",
            "dependency-analysis"
        ]
    })));
}

#[test]
fn agent_missing_name_is_rejected() {
    let result = validate_agent(&json!({ "version": "1.0", "description": "An agent without a name" }));
    assert_invalid_with(&result, "required");
}

#[test]
fn agent_empty_name_is_rejected() {
    let result = validate_agent(&json!({ "version": "1.0", "name": "" }));
    assert_invalid_with(&result, "minLength");
    let error = result.errors().iter().find(|e| e.keyword == "minLength").unwrap();
    assert_eq!(error.instance_path, "/name");
    assert_eq!(error.params["limit"], 1);
}

#[test]
fn agent_temperature_out_of_range_is_rejected() {
    let result = validate_agent(&json!({ "version": "1.0", "name": "Test Agent", "temperature": 2.5 }));
    assert_invalid_with(&result, "maximum");

    let result = validate_agent(&json!({ "version": "1.0", "name": "Test Agent", "temperature": -0.1 }));
    assert_invalid_with(&result, "minimum");
    let error = result.errors().iter().find(|e| e.keyword == "minimum").unwrap();
    assert_eq!(error.params["comparison"], ">=");
    assert_eq!(error.params["limit"], 0);
}

#[test]
fn agent_tools_and_rules_are_file_paths() {
    assert_valid(&validate_agent(&json!({
        "version": "1.0",
        "name": "Multi-Tool Agent",
        "tools": ["tool1.json", "tool2.json", "tool3.json"],
        "rules": ["rule1.md", "rule2.md", "rule3.md"]
    })));

    let result = validate_agent(&json!({
        "version": "1.0",
        "name": "Escaping Agent",
        "tools": ["../../outside.json"]
    }));
    assert_invalid_with(&result, "format");
}

#[test]
fn agent_empty_arrays_are_valid() {
    assert_valid(&validate_agent(&json!({
        "version": "1.0",
        "name": "Simple Agent",
        "tools": [],
        "rules": [],
        "capabilities": []
    })));
}

#[test]
fn agent_model_names_follow_the_vendor_shapes() {
    for model in ["claude-sonnet-4", "gpt-4-turbo", "gemini-1.5-pro", "meta-llama/Llama-3-8b"] {
        let result = validate_agent(&json!({ "version": "1.0", "name": "A", "model": model }));
        assert_valid(&result);
    }
    for model in ["", "-bad", "has space", "emoji🙂"] {
        let result = validate_agent(&json!({ "version": "1.0", "name": "A", "model": model }));
        assert_invalid_with(&result, "format");
    }
}

#[test]
fn multi_agent_system_is_valid() {
    for (name, temperature) in [
        ("Code Reviewer", 0.3),
        ("Documentation Generator", 0.7),
        ("Test Generator", 0.5),
    ] {
        let agent = json!({ "version": "1.0", "name": name, "temperature": temperature });
        assert_valid(&validate_agent(&agent));
    }
}

#[test]
fn garbage_input_never_panics_for_any_validator() {
    let garbage = json!({ "invalid": "data" });
    for result in [
        validate_context(&garbage),
        validate_profile(&garbage),
        validate_agent(&garbage),
        versa_schema::validate_tool(&garbage),
        versa_schema::validate_knowledge(&garbage),
        versa_schema::validate_memory(&garbage),
    ] {
        assert!(!result.is_valid());
    }
}

//! OpenAPI description of the `/api/links` resource, served under `/swagger`.

use linkshelf_core::{MAX_COMMENT_CHARS, MAX_ORIGINAL_URL_CHARS, MAX_SHORT_NAME_CHARS};
use serde_json::{json, Value};

use crate::handlers::LINKS_PATH;
use crate::model::JSON_API_MEDIA_TYPE;
use crate::pagination::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

pub const DOCUMENT_PATH: &str = "/swagger/doc.json";

pub fn document() -> Value {
    let error_response = |description: &str| {
        json!({
            "description": description,
            "content": { JSON_API_MEDIA_TYPE: { "schema": { "$ref": "#/components/schemas/Errors" } } }
        })
    };
    let link_response = |description: &str| {
        json!({
            "description": description,
            "content": { JSON_API_MEDIA_TYPE: { "schema": { "$ref": "#/components/schemas/LinkDocument" } } }
        })
    };
    let link_body = json!({
        "required": true,
        "content": { JSON_API_MEDIA_TYPE: { "schema": { "$ref": "#/components/schemas/LinkRequest" } } }
    });
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64", "minimum": 1 }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "linkshelf",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Short aliases for long URLs."
        },
        "paths": {
            LINKS_PATH: {
                "get": {
                    "summary": "List links",
                    "parameters": [
                        {
                            "name": "page[number]",
                            "in": "query",
                            "schema": { "type": "integer", "minimum": 1, "default": DEFAULT_PAGE_NUMBER }
                        },
                        {
                            "name": "page[size]",
                            "in": "query",
                            "schema": {
                                "type": "integer",
                                "minimum": 0,
                                "maximum": MAX_PAGE_SIZE,
                                "default": DEFAULT_PAGE_SIZE
                            }
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "One page of links",
                            "content": { JSON_API_MEDIA_TYPE: { "schema": { "$ref": "#/components/schemas/LinkList" } } }
                        }
                    }
                },
                "post": {
                    "summary": "Create a link",
                    "requestBody": link_body.clone(),
                    "responses": {
                        "201": link_response("The stored link"),
                        "400": error_response("Invalid fields or short name already taken"),
                        "406": error_response("Malformed request body"),
                        "409": error_response("Resource type mismatch")
                    }
                }
            },
            format!("{LINKS_PATH}/{{id}}"): {
                "get": {
                    "summary": "Get a link",
                    "parameters": [id_param.clone()],
                    "responses": {
                        "200": link_response("The link"),
                        "404": error_response("No such link")
                    }
                },
                "patch": {
                    "summary": "Replace a link",
                    "parameters": [id_param.clone()],
                    "requestBody": link_body,
                    "responses": {
                        "200": link_response("The updated link"),
                        "400": error_response("Invalid fields or short name already taken"),
                        "404": error_response("No such link"),
                        "406": error_response("Malformed request body"),
                        "409": error_response("Id or resource type mismatch")
                    }
                },
                "delete": {
                    "summary": "Delete a link",
                    "parameters": [id_param],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": error_response("No such link")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "LinkAttributes": {
                    "type": "object",
                    "properties": {
                        "shortName": {
                            "type": "string",
                            "pattern": "^[A-Za-z0-9-]*$",
                            "maxLength": MAX_SHORT_NAME_CHARS
                        },
                        "originalUrl": {
                            "type": "string",
                            "format": "uri",
                            "maxLength": MAX_ORIGINAL_URL_CHARS
                        },
                        "comment": { "type": "string", "maxLength": MAX_COMMENT_CHARS }
                    }
                },
                "LinkResource": {
                    "type": "object",
                    "properties": {
                        "type": { "type": "string", "enum": ["links"] },
                        "id": { "type": "string" },
                        "attributes": { "$ref": "#/components/schemas/LinkAttributes" }
                    }
                },
                "LinkDocument": {
                    "type": "object",
                    "properties": { "data": { "$ref": "#/components/schemas/LinkResource" } }
                },
                "LinkRequest": {
                    "type": "object",
                    "required": ["data"],
                    "properties": { "data": { "$ref": "#/components/schemas/LinkResource" } }
                },
                "LinkList": {
                    "type": "object",
                    "properties": {
                        "data": { "type": "array", "items": { "$ref": "#/components/schemas/LinkResource" } },
                        "meta": { "type": "object", "properties": { "links": { "type": "integer" } } },
                        "links": {
                            "type": "object",
                            "properties": {
                                "first": { "type": "string" },
                                "prev": { "type": "string" },
                                "next": { "type": "string" },
                                "last": { "type": "string" }
                            }
                        }
                    }
                },
                "Errors": {
                    "type": "object",
                    "properties": {
                        "errors": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "status": { "type": "string" },
                                    "title": { "type": "string" },
                                    "detail": { "type": "string" },
                                    "source": {
                                        "type": "object",
                                        "properties": { "pointer": { "type": "string" } }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Swagger UI page loading [`DOCUMENT_PATH`].
pub fn index_page() -> String {
    format!(
        r##"<!doctype html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>linkshelf API</title>
        <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
        <script>
            window.onload = () => {{
                window.ui = SwaggerUIBundle({{ url: "{DOCUMENT_PATH}", dom_id: "#swagger-ui" }});
            }};
        </script>
    </body>
</html>
"##
    )
}

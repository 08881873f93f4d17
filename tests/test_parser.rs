use emberweb::http::parser::{ParseError, parse_query, parse_request_line};
use emberweb::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let request = parse_request_line(b"GET / HTTP/1.1\r\n").unwrap();

    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url, "/");
    assert_eq!(request.path, "/");
    assert_eq!(request.query, "");
    assert_eq!(request.version, "1.1");
    assert!(request.parameters.is_empty());
    assert!(request.header.is_empty());
}

#[test]
fn test_parse_request_with_query_string() {
    let request = parse_request_line(b"GET /page?key1=0.07&key2=0.03 HTTP/1.1\r\n").unwrap();

    assert_eq!(request.path, "/page");
    assert_eq!(request.query, "key1=0.07&key2=0.03");
    assert_eq!(request.parameters.len(), 2);
    assert_eq!(request.parameters.get("key1").unwrap(), "0.07");
    assert_eq!(request.parameters.get("key2").unwrap(), "0.03");
}

#[test]
fn test_url_reconstructs_from_path_and_query() {
    let request = parse_request_line(b"GET /page?a=1&b=2 HTTP/1.1\r\n").unwrap();
    assert_eq!(format!("{}?{}", request.path, request.query), request.url);

    let request = parse_request_line(b"GET /page/sub HTTP/1.1\r\n").unwrap();
    assert_eq!(request.path, request.url);
}

#[test]
fn test_too_few_tokens_is_invalid() {
    let result = parse_request_line(b"GET HTTP/1.1\r\n");
    assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
}

#[test]
fn test_too_many_tokens_is_invalid() {
    let result = parse_request_line(b"GET /a /b HTTP/1.1\r\n");
    assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
}

#[test]
fn test_unknown_method_is_invalid() {
    let result = parse_request_line(b"UNKNOWN / HTTP/1.1\r\n");
    assert!(matches!(result, Err(ParseError::UnsupportedMethod(_))));
}

#[test]
fn test_lowercase_method_is_invalid() {
    let result = parse_request_line(b"get / HTTP/1.1\r\n");
    assert!(matches!(result, Err(ParseError::UnsupportedMethod(_))));
}

#[test]
fn test_invalid_utf8_is_rejected_not_fatal() {
    let result = parse_request_line(b"GET /\xff\xfe HTTP/1.1\r\n");
    assert_eq!(result.unwrap_err(), ParseError::Encoding);
}

#[test]
fn test_version_prefix_is_stripped() {
    let request = parse_request_line(b"GET / HTTP/1.0\r\n").unwrap();
    assert_eq!(request.version, "1.0");
}

#[test]
fn test_version_without_prefix_kept_as_is() {
    let request = parse_request_line(b"GET / 1.1\r\n").unwrap();
    assert_eq!(request.version, "1.1");
}

#[test]
fn test_all_eight_methods_accepted() {
    for method in [
        "GET", "HEAD", "POST", "PUT", "DELETE", "CONNECT", "OPTIONS", "TRACE",
    ] {
        let line = format!("{method} / HTTP/1.1\r\n");
        let request = parse_request_line(line.as_bytes()).unwrap();
        assert_eq!(request.method.as_str(), method);
    }
}

#[test]
fn test_query_pair_without_equals_is_skipped() {
    let parameters = parse_query("a=1&junk&b=2");

    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters.get("a").unwrap(), "1");
    assert_eq!(parameters.get("b").unwrap(), "2");
    assert!(!parameters.contains_key("junk"));
}

#[test]
fn test_query_first_duplicate_key_wins() {
    let parameters = parse_query("a=1&a=2");

    assert_eq!(parameters.len(), 1);
    assert_eq!(parameters.get("a").unwrap(), "1");
}

#[test]
fn test_query_parsing_is_idempotent() {
    let first = parse_query("a=1&junk&b=2&a=3");
    let second = parse_query("a=1&junk&b=2&a=3");
    assert_eq!(first, second);
}

#[test]
fn test_empty_query_yields_no_parameters() {
    assert!(parse_query("").is_empty());
}

#[test]
fn test_query_value_may_contain_equals() {
    let parameters = parse_query("expr=a=b");
    assert_eq!(parameters.get("expr").unwrap(), "a=b");
}

use catalog_server::http::response::{CannedResponses, ResponseBuilder, StatusCode};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Found.as_u16(), 302);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Found.reason_phrase(), "Found");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::NotImplemented.reason_phrase(),
        "Not Implemented"
    );
}

#[test]
fn test_response_builder_close_if() {
    let keep = ResponseBuilder::new(StatusCode::Found)
        .header("Location", "http://h:1/x")
        .close_if(false)
        .build();
    let close = ResponseBuilder::new(StatusCode::NotFound)
        .close_if(true)
        .build();

    assert_eq!(keep.status, StatusCode::Found);
    assert_eq!(keep.headers, vec![("Location", "http://h:1/x".to_string())]);
    assert_eq!(
        &close.encode()[..],
        b"HTTP/1.1 404 Not Found\r\nConnection: close\r\n\r\n"
    );
}

#[test]
fn test_canned_bad_request() {
    let canned = CannedResponses::new("test-server");
    let head = canned.status(StatusCode::BadRequest, false).unwrap();

    assert_eq!(
        &head[..],
        b"HTTP/1.1 400 Bad Request\r\nConnection: close\r\nServer: test-server\r\n\r\n"
    );
}

#[test]
fn test_canned_internal_error_always_closes() {
    let canned = CannedResponses::new("test-server");

    for close in [false, true] {
        let head = canned
            .status(StatusCode::InternalServerError, close)
            .unwrap();
        assert_eq!(
            &head[..],
            b"HTTP/1.1 500 Internal Server Error\r\nConnection: close\r\nServer: test-server\r\n\r\n"
        );
    }
}

#[test]
fn test_canned_not_implemented_never_forces_close() {
    let canned = CannedResponses::new("test-server");
    let head = canned.status(StatusCode::NotImplemented, true).unwrap();

    assert_eq!(
        &head[..],
        b"HTTP/1.1 501 Not Implemented\r\nServer: test-server\r\n\r\n"
    );
}

#[test]
fn test_canned_not_found_variants() {
    let canned = CannedResponses::new("test-server");

    assert_eq!(
        &canned.status(StatusCode::NotFound, false).unwrap()[..],
        b"HTTP/1.1 404 Not Found\r\nServer: test-server\r\n\r\n"
    );
    assert_eq!(
        &canned.status(StatusCode::NotFound, true).unwrap()[..],
        b"HTTP/1.1 404 Not Found\r\nServer: test-server\r\nConnection: close\r\n\r\n"
    );
}

#[test]
fn test_canned_has_no_head_for_success_statuses() {
    let canned = CannedResponses::new("test-server");

    assert!(canned.status(StatusCode::Ok, false).is_none());
    assert!(canned.status(StatusCode::Found, false).is_none());
}

#[test]
fn test_file_head() {
    let canned = CannedResponses::new("test-server");

    assert_eq!(
        &canned.file(1234, false)[..],
        &b"HTTP/1.1 200 OK\r\nServer: test-server\r\nContent-Type: application/octet-stream\r\nContent-Length: 1234\r\n\r\n"[..]
    );
    assert_eq!(
        &canned.file(0, true)[..],
        &b"HTTP/1.1 200 OK\r\nServer: test-server\r\nConnection: close\r\nContent-Type: application/octet-stream\r\nContent-Length: 0\r\n\r\n"[..]
    );
}

#[test]
fn test_redirect_head() {
    let canned = CannedResponses::new("test-server");

    assert_eq!(
        &canned.redirect("http://host.example:9090/old.txt")[..],
        &b"HTTP/1.1 302 Found\r\nServer: test-server\r\nLocation: http://host.example:9090/old.txt\r\n\r\n"[..]
    );
}

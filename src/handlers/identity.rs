use actix_web::HttpRequest;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::auth::{Requester, Role};
use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Reads the identity the gateway asserted through `x-user-id` and
/// `x-user-role`. An absent id header means an internal caller with no
/// identity; an absent role header means a plain customer.
pub fn requester_from_headers(req: &HttpRequest) -> Result<Option<Requester>, AppError> {
    let Some(raw_id) = req.headers().get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let user_id = raw_id
        .to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::BadRequest(format!("invalid {USER_ID_HEADER} header")))?;

    let role = match req.headers().get(USER_ROLE_HEADER) {
        None => Role::Customer,
        Some(raw) => {
            let raw = raw
                .to_str()
                .map_err(|_| AppError::BadRequest(format!("invalid {USER_ROLE_HEADER} header")))?;
            Role::from_str(raw)
                .map_err(|_| AppError::BadRequest(format!("unknown role '{raw}'")))?
        }
    };

    Ok(Some(Requester { user_id, role }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn no_headers_means_no_requester() {
        let req = TestRequest::default().to_http_request();
        assert!(requester_from_headers(&req).unwrap().is_none());
    }

    #[test]
    fn id_header_without_role_defaults_to_customer() {
        let user_id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, user_id.to_string()))
            .to_http_request();

        let requester = requester_from_headers(&req).unwrap().unwrap();
        assert_eq!(requester.user_id, user_id);
        assert_eq!(requester.role, Role::Customer);
    }

    #[test]
    fn admin_role_is_honoured() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, Uuid::new_v4().to_string()))
            .insert_header((USER_ROLE_HEADER, "admin"))
            .to_http_request();

        let requester = requester_from_headers(&req).unwrap().unwrap();
        assert_eq!(requester.role, Role::Admin);
    }

    #[test]
    fn malformed_user_id_is_rejected() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_http_request();

        assert!(matches!(
            requester_from_headers(&req),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, Uuid::new_v4().to_string()))
            .insert_header((USER_ROLE_HEADER, "superuser"))
            .to_http_request();

        assert!(matches!(
            requester_from_headers(&req),
            Err(AppError::BadRequest(_))
        ));
    }
}

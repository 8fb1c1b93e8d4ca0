macro_rules! internal_server_error {
    () => {{
        return Err($crate::errors::ClientError::internal_server_error().into());
    }};
}

pub(crate) use internal_server_error;


macro_rules! unexpected_status_code {
    ($response_status_code:expr) => {{
        return Err(
            $crate::errors::ClientError::unexpected_status_code($response_status_code).into(),
        );
    }};
}

pub(crate) use unexpected_status_code;



macro_rules! unexpected_error_detail {
    ($error_response:expr, $response_status:expr) => {
        return Err(
            $crate::errors::ClientError::unexpected_error_detail(
                $error_response,
                $response_status,
            )
            .into(),
        )
    };
}

pub(crate) use unexpected_error_detail;

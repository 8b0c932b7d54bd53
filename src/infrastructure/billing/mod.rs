pub mod abacatepay_client;

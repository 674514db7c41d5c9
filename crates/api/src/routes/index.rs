//! Welcome Route

/// Plain-text listing of the available routes
pub const WELCOME: &str = "Welcome to the Climate App! Available routes:\n\
/api/v1.0/precipitation\n\
/api/v1.0/stations\n\
/api/v1.0/tobs\n\
/api/v1.0/<start>\n\
/api/v1.0/<start>/<end>";

pub async fn get_index() -> &'static str {
    WELCOME
}

use super::Output;
use anyhow::Result;
use jalmitra_application::AppContext;
use jalmitra_core::auth::Credentials;
use serde_json::json;

pub async fn login(
    context: &AppContext,
    output: &Output,
    phone: String,
    password: String,
) -> Result<()> {
    let user_id = context.sign_in(&Credentials::new(phone, password)).await?;
    output.emit(&json!({ "userId": user_id }), || println!("Signed in as {user_id}"))
}

pub async fn logout(context: &AppContext, output: &Output) -> Result<()> {
    context.sign_out().await?;
    output.emit(&json!({ "isActive": false }), || println!("Signed out"))
}

pub fn status(context: &AppContext, output: &Output) -> Result<()> {
    let session = context.session().snapshot();
    let profile = context.profile().snapshot();
    let sensor = context.sensor().snapshot();

    let value = json!({
        "session": session,
        "profile": profile,
        "sensor": sensor,
    });

    output.emit(&value, || {
        match session.user_id() {
            Some(user_id) => println!("Session:  signed in as {user_id}"),
            None => println!("Session:  signed out"),
        }
        println!("Farmer:   {} ({}) in {}", profile.name, profile.id, profile.village);
        println!("Well:     {}", sensor.well_id);
        match &sensor.reading {
            Some(reading) => println!(
                "Level:    {:.0}% ({}), TDS {:.0} ppm, pH {:.1}, {:.0}°C",
                reading.level_percent,
                reading.level_status,
                reading.total_dissolved_solids_ppm,
                reading.ph,
                reading.temperature_celsius
            ),
            None => println!("Level:    no data"),
        }
        if let Some(err) = sensor.error() {
            println!("Warning:  showing last known data ({err})");
        }
        println!("Alerts:   {} unresolved", sensor.unresolved_count());
    })
}

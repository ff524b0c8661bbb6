use super::Output;
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use jalmitra_application::AppContext;
use jalmitra_core::farmer::{FarmerProfile, Language, MeasurementUnits};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the active profile
    Show,
    /// Change profile fields; unspecified fields keep their value
    Set(SetArgs),
}

#[derive(Args)]
pub struct SetArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub village: Option<String>,
    /// Well to monitor
    #[arg(long)]
    pub well: Option<String>,
    #[arg(long, value_enum)]
    pub language: Option<LanguageArg>,
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LanguageArg {
    En,
    Hi,
    Bn,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::En,
            LanguageArg::Hi => Language::Hi,
            LanguageArg::Bn => Language::Bn,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    Feet,
    Meters,
}

impl From<UnitsArg> for MeasurementUnits {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Feet => MeasurementUnits::Feet,
            UnitsArg::Meters => MeasurementUnits::Meters,
        }
    }
}

impl SetArgs {
    fn apply(self, mut profile: FarmerProfile) -> FarmerProfile {
        if let Some(id) = self.id {
            profile.id = id;
        }
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(village) = self.village {
            profile.village = village;
        }
        if let Some(well) = self.well {
            profile.assigned_well_id = well;
        }
        if let Some(language) = self.language {
            profile.preferred_language = language.into();
        }
        if let Some(units) = self.units {
            profile.measurement_units = units.into();
        }
        profile
    }
}

pub async fn run(context: &AppContext, output: &Output, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => show(output, &context.profile().snapshot()),
        ProfileAction::Set(args) => {
            let updated = args.apply(context.profile().snapshot());
            context.update_profile(updated).await?;
            show(output, &context.profile().snapshot())
        }
    }
}

fn show(output: &Output, profile: &FarmerProfile) -> Result<()> {
    output.emit(profile, || {
        println!("Id:        {}", profile.id);
        println!("Name:      {}", profile.name);
        println!("Phone:     {}", profile.phone);
        println!("Village:   {}", profile.village);
        println!("Well:      {}", profile.assigned_well_id);
        println!("Language:  {:?}", profile.preferred_language);
        println!("Units:     {:?}", profile.measurement_units);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_only_touches_given_fields() {
        let args = SetArgs {
            id: None,
            name: None,
            phone: None,
            village: None,
            well: Some("WB125".to_string()),
            language: Some(LanguageArg::Hi),
            units: None,
        };

        let updated = args.apply(FarmerProfile::default());
        assert_eq!(updated.assigned_well_id, "WB125");
        assert_eq!(updated.preferred_language, Language::Hi);
        assert_eq!(updated.id, "F1001");
        assert_eq!(updated.measurement_units, MeasurementUnits::Feet);
    }
}

use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDate};
use clap::Parser;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;

use clubhouse::{
    config::Settings,
    domain::{Event, Member, Person, Student, Subscription, SubscriptionStatus, Teacher},
    service::ServiceContext,
};

#[derive(Parser, Debug)]
#[command(about = "Fill the record stores with sample data")]
struct Args {
    /// Directory holding the JSON stores (defaults to the configured one)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Remove existing store files before seeding
    #[arg(long)]
    reset: bool,

    /// Extra randomly generated students
    #[arg(long, default_value_t = 0)]
    random_students: u32,
}

fn member(
    full_name: &str,
    email: &str,
    phone: &str,
    address: &str,
    join_date: NaiveDate,
) -> Member {
    Member::new(full_name, email, phone, address, join_date)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clubhouse=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });
    if let Some(data_dir) = args.data_dir {
        settings.storage.data_dir = data_dir;
    }

    println!("🌱 Seeding stores in {}", settings.storage.data_dir.display());

    if args.reset {
        let storage = &settings.storage;
        for path in [
            storage.members_path(),
            storage.students_path(),
            storage.teachers_path(),
            storage.events_path(),
            storage.subscriptions_path(),
        ] {
            if path.exists() {
                std::fs::remove_file(&path)?;
            }
        }
        println!("🧹 Removed existing store files");
    }

    let ctx = ServiceContext::open(&settings)?;
    let today = Local::now().date_naive();

    // Seed members
    println!("👥 Creating members...");

    let mut alice = member(
        "Alice Martin",
        "alice@example.com",
        "0601020304",
        "1 Rue de la Paix",
        today - Duration::days(400),
    );
    alice.add_skill("Python");
    alice.add_skill("Java");
    alice.add_interest("robotics");

    let mut bob = Student::new(
        member(
            "Bob Durand",
            "bob@example.com",
            "0611223344",
            "12 Avenue Foch",
            today - Duration::days(200),
        ),
        1001,
    );
    bob.member.add_interest("chess");
    bob.update_subscription_status(SubscriptionStatus::Active);

    let chloe = Student::new(
        member(
            "Chloé Bernard",
            "chloe@example.com",
            "0622334455",
            "5 Place Bellecour",
            today - Duration::days(30),
        ),
        1002,
    );

    let mut david = Teacher::new(
        member(
            "David Petit",
            "david@example.com",
            "0633445566",
            "8 Quai de Saône",
            today - Duration::days(900),
        ),
        1,
        "Mathematics",
    );
    david.assign_group("Group A");
    david.assign_group("Group B");

    ctx.member_repo.save(&Person::Member(alice))?;
    ctx.member_repo.save(&Person::Student(bob.clone()))?;
    ctx.member_repo.save(&Person::Student(chloe.clone()))?;
    ctx.member_repo.save(&Person::Teacher(david.clone()))?;
    ctx.student_repo.save(&bob)?;
    ctx.student_repo.save(&chloe)?;
    ctx.teacher_repo.save(&david)?;

    for offset in 0..args.random_students {
        let student_id = 2000 + i64::from(offset);
        let random = Student::new(
            Member::new(
                Name().fake::<String>(),
                SafeEmail().fake::<String>(),
                PhoneNumber().fake::<String>(),
                format!("{}, {}", StreetName().fake::<String>(), CityName().fake::<String>()),
                today - Duration::days((1..365).fake::<i64>()),
            ),
            student_id,
        );
        ctx.member_repo.save(&Person::Student(random.clone()))?;
        ctx.student_repo.save(&random)?;
    }

    println!("  ✅ Created 4 members and {} random students", args.random_students);

    // Seed events
    println!("📅 Creating events...");

    let events = [
        Event::meeting(
            "Monthly Members Meeting",
            "Club business and upcoming activities.",
            today + Duration::days(7),
            "main room",
        ),
        Event::trip(
            "Science Museum Visit",
            "Guided tour for all groups.",
            today + Duration::days(14),
            "Lyon",
        ),
        Event::competition(
            "Spring Chess Open",
            "Rapid tournament, all levels.",
            today + Duration::days(21),
            "Trophy",
        ),
    ];
    for event in &events {
        ctx.event_repo.save(event)?;
    }
    ctx.member_service.assign_teacher_to_event(david.teacher_id, "Spring Chess Open")?;

    println!("  ✅ Created {} events", events.len());

    // Seed subscriptions
    println!("💳 Creating subscriptions...");

    let mut bob_annual = Subscription::annual(bob.student_id, 240.0, today - Duration::days(60));
    bob_annual.mark_paid();
    let bob_monthly = Subscription::monthly(bob.student_id, 25.0, today - Duration::days(30));
    let chloe_standard = Subscription::new(chloe.student_id, 50.0, today - Duration::days(10));
    let donation = Subscription::donation(
        chloe.student_id,
        100.0,
        today - Duration::days(5),
        "Mme Leroy",
    );

    for subscription in [&bob_annual, &bob_monthly, &chloe_standard, &donation] {
        ctx.subscription_repo.save(subscription)?;
    }
    ctx.finance_service.record_payment(
        donation.student_id,
        donation.date,
        donation.subscription_type(),
    )?;

    println!("  ✅ Created 4 subscriptions");
    println!("\n✨ Seeding complete! Total revenue: {:.2}", ctx.finance_service.total_revenue());

    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

use crate::application::{ReservationRegistry, ShiftLedger};
use crate::domain::{
    BanknoteCount, GroupReservation, GroupType, ReservationForm, Shift, format_cents, parse_cents,
};
use crate::storage::Snapshot;

/// Peron - ticket-counter back office
#[derive(Parser)]
#[command(name = "peron")]
#[command(about = "Cash-drawer shift ledger and group reservation registry for ticket counters")]
#[command(version)]
pub struct Cli {
    /// State file path
    #[arg(short, long, default_value = "peron.json")]
    pub data: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cash-drawer shift commands
    #[command(subcommand)]
    Shift(ShiftCommands),

    /// Group reservation commands
    #[command(subcommand)]
    Reservation(ReservationCommands),
}

#[derive(Subcommand)]
pub enum ShiftCommands {
    /// Open a shift with a starting cash float
    Open {
        /// Starting deposit (e.g., "100.00")
        deposit: String,

        /// Blank ticket cards handed over at open
        #[arg(long)]
        cards: Option<u32>,
    },

    /// Record banknotes entering the drawer
    Add {
        /// Banknote face value (e.g., "50")
        denomination: String,

        /// Number of banknotes
        count: u32,
    },

    /// Record banknotes leaving the drawer
    Remove {
        /// Banknote face value (e.g., "50")
        denomination: String,

        /// Number of banknotes
        count: u32,
    },

    /// Close the shift against a physical count
    Close {
        /// Counted stacks as DENOMxCOUNT pairs (e.g., "50x1 20x2")
        counted: Vec<String>,

        /// Remaining ticket cards
        #[arg(long)]
        cards: Option<u32>,
    },

    /// Show the open shift and its drawer ledger
    Status,

    /// List closed shifts, most recent first
    History,
}

#[derive(Subcommand)]
pub enum ReservationCommands {
    /// Register a new group reservation
    Register {
        /// Group leader's full name
        #[arg(long)]
        leader: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// Total passengers (minimum 11)
        #[arg(long)]
        passengers: u32,

        /// Children under 7
        #[arg(long, default_value_t = 0)]
        children: u32,

        /// Passengers travelling at a discount
        #[arg(long, default_value_t = 0)]
        discounted: u32,

        /// Group type: students, kindergarten or other
        #[arg(long)]
        group_type: String,

        /// Departure station
        #[arg(long)]
        from: String,

        /// Destination station
        #[arg(long)]
        to: String,

        /// Departure date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Departure time (HH:MM)
        #[arg(long)]
        time: Option<String>,

        /// Book a round trip
        #[arg(long)]
        round_trip: bool,

        /// Return date (YYYY-MM-DD), required for round trips
        #[arg(long)]
        return_date: Option<String>,

        /// Return time (HH:MM), required for round trips
        #[arg(long)]
        return_time: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Confirm a pending reservation
    Confirm {
        /// Reservation id
        id: String,
    },

    /// Record a settled payment for a confirmed reservation
    Pay {
        /// Reservation id
        id: String,

        /// Amount paid (e.g., "262.50")
        amount: String,
    },

    /// Issue the group ticket for a paid reservation
    Issue {
        /// Reservation id
        id: String,
    },

    /// Cancel a reservation (irreversible)
    Cancel {
        /// Reservation id
        id: String,

        /// Reason for the cancellation
        #[arg(short, long)]
        reason: String,
    },

    /// Show one reservation
    Show {
        /// Reservation id
        id: String,
    },

    /// List reservations, most recent first
    List,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let snapshot = Snapshot::load(&self.data)?;
        let (mut ledger, registry) = snapshot.into_services();

        match self.command {
            Commands::Shift(command) => run_shift(command, &mut ledger)?,
            Commands::Reservation(command) => run_reservation(command, &registry)?,
        }

        Snapshot::capture(ledger, &registry).save(&self.data)
    }
}

fn run_shift(command: ShiftCommands, ledger: &mut ShiftLedger) -> Result<()> {
    match command {
        ShiftCommands::Open { deposit, cards } => {
            let deposit = parse_cents(&deposit).context("Invalid deposit amount")?;
            let shift = ledger.open_shift(deposit, cards)?;
            println!(
                "Opened shift {} with a float of {}",
                shift.id,
                format_cents(shift.initial_deposit)
            );
        }
        ShiftCommands::Add {
            denomination,
            count,
        } => {
            let denomination = parse_cents(&denomination).context("Invalid denomination")?;
            ledger.add_banknote(denomination, count)?;
            println!("Added {} x {}", count, format_cents(denomination));
        }
        ShiftCommands::Remove {
            denomination,
            count,
        } => {
            let denomination = parse_cents(&denomination).context("Invalid denomination")?;
            ledger.remove_banknote(denomination, count)?;
            println!("Removed {} x {}", count, format_cents(denomination));
        }
        ShiftCommands::Close { counted, cards } => {
            let final_banknotes = counted
                .iter()
                .map(|pair| parse_banknote_pair(pair))
                .collect::<Result<Vec<_>>>()?;
            let shift = ledger.close_shift(final_banknotes, cards)?;
            println!(
                "Closed shift {} — counted total {}",
                shift.id,
                format_cents(shift.total_amount.unwrap_or(0))
            );
        }
        ShiftCommands::Status => match ledger.current_shift() {
            Some(shift) => print_shift(shift),
            None => println!("No shift is open."),
        },
        ShiftCommands::History => {
            if ledger.history().is_empty() {
                println!("No closed shifts.");
            }
            for shift in ledger.history() {
                println!(
                    "{}  opened {}  total {}",
                    shift.id,
                    shift.opened_at.format("%Y-%m-%d %H:%M"),
                    shift
                        .total_amount
                        .map(format_cents)
                        .unwrap_or_else(|| "-".to_string())
                );
            }
        }
    }

    Ok(())
}

fn run_reservation(command: ReservationCommands, registry: &ReservationRegistry) -> Result<()> {
    match command {
        ReservationCommands::Register {
            leader,
            email,
            phone,
            passengers,
            children,
            discounted,
            group_type,
            from,
            to,
            date,
            time,
            round_trip,
            return_date,
            return_time,
            notes,
        } => {
            let Some(group_type) = GroupType::from_str(&group_type) else {
                bail!("Unknown group type: {group_type} (expected students, kindergarten or other)");
            };

            let form = ReservationForm {
                leader_name: leader,
                email,
                phone,
                total_passengers: passengers,
                children_under_7: children,
                discount_passengers: discounted,
                group_type: Some(group_type),
                from_station: from,
                to_station: to,
                departure_date: parse_date_opt(date.as_deref())?,
                departure_time: parse_time_opt(time.as_deref())?,
                round_trip,
                return_date: parse_date_opt(return_date.as_deref())?,
                return_time: parse_time_opt(return_time.as_deref())?,
                notes,
            };

            let reservation = registry.register(form)?;
            println!("Registered reservation {} (pending)", reservation.id);
        }
        ReservationCommands::Confirm { id } => {
            let reservation = registry.confirm(&id)?;
            println!("Reservation {} confirmed", reservation.id);
        }
        ReservationCommands::Pay { id, amount } => {
            let amount = parse_cents(&amount).context("Invalid payment amount")?;
            let reservation = registry.settle_payment(&id, amount)?;
            println!(
                "Reservation {} paid ({})",
                reservation.id,
                format_cents(amount)
            );
        }
        ReservationCommands::Issue { id } => {
            let reservation = registry.issue_ticket(&id)?;
            println!("Ticket issued for reservation {}", reservation.id);
        }
        ReservationCommands::Cancel { id, reason } => {
            let cancellation = registry.cancel(&id, &reason)?;
            println!("Reservation {} cancelled — seats released", id);
            if cancellation.refund_due {
                println!("Refund due to the group leader.");
            }
        }
        ReservationCommands::Show { id } => {
            print_reservation(&registry.get(&id)?);
        }
        ReservationCommands::List => {
            let reservations = registry.list();
            if reservations.is_empty() {
                println!("No reservations.");
            }
            for reservation in reservations {
                println!(
                    "{}  {:<13}  {} -> {}  {} pax  {}",
                    reservation.id,
                    reservation.status,
                    reservation.route.from_station,
                    reservation.route.to_station,
                    reservation.total_passengers,
                    reservation.departure.date
                );
            }
        }
    }

    Ok(())
}

/// Parse a counted stack written as "50x2" (two 50-unit notes).
fn parse_banknote_pair(pair: &str) -> Result<BanknoteCount> {
    let Some((denomination, count)) = pair.split_once(['x', 'X']) else {
        bail!("Invalid banknote pair '{pair}', expected DENOMxCOUNT (e.g., 50x2)");
    };
    let denomination =
        parse_cents(denomination).with_context(|| format!("Invalid denomination in '{pair}'"))?;
    let count = count
        .parse()
        .with_context(|| format!("Invalid count in '{pair}'"))?;
    Ok(BanknoteCount::new(denomination, count))
}

fn parse_date_opt(input: Option<&str>) -> Result<Option<NaiveDate>> {
    input
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").context("Invalid date, expected YYYY-MM-DD"))
        .transpose()
}

fn parse_time_opt(input: Option<&str>) -> Result<Option<NaiveTime>> {
    input
        .map(|s| NaiveTime::parse_from_str(s, "%H:%M").context("Invalid time, expected HH:MM"))
        .transpose()
}

fn print_shift(shift: &Shift) {
    println!("Shift {}", shift.id);
    println!("  opened:  {}", shift.opened_at.format("%Y-%m-%d %H:%M"));
    println!("  float:   {}", format_cents(shift.initial_deposit));
    if let Some(cards) = shift.initial_card_count {
        println!("  cards:   {}", cards);
    }
    println!("  drawer:");
    for (denomination, count) in &shift.drawer {
        println!("    {} x {}", format_cents(*denomination), count);
    }
    println!("  drawer total: {}", format_cents(shift.drawer_total()));
}

fn print_reservation(reservation: &GroupReservation) {
    println!("Reservation {}", reservation.id);
    println!("  status:     {}", reservation.status);
    println!(
        "  leader:     {} <{}> {}",
        reservation.leader_name, reservation.contact.email, reservation.contact.phone
    );
    println!(
        "  route:      {} -> {}",
        reservation.route.from_station, reservation.route.to_station
    );
    println!(
        "  departure:  {} {}",
        reservation.departure.date, reservation.departure.time
    );
    if let Some(return_trip) = &reservation.return_trip {
        println!("  return:     {} {}", return_trip.date, return_trip.time);
    }
    println!(
        "  group:      {} passengers ({} children under 7, {} discounted), {}",
        reservation.total_passengers,
        reservation.children_under_7,
        reservation.discount_passengers,
        reservation.group_type
    );
    if let Some(price) = reservation.final_price {
        println!("  paid:       {}", format_cents(price));
    }
    if let Some(reason) = &reservation.cancel_reason {
        println!("  cancelled:  {}", reason);
    }
    if let Some(notes) = &reservation.notes {
        println!("  notes:      {}", notes);
    }
}

//! Command-line surface of the club client. Each subcommand maps onto one of
//! the club's pages; the booking command walks the same four-step form the
//! website used, printing the choices for the next step until the selection
//! is complete.

use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::api::ClubApi;
use crate::availability;
use crate::booking::{BookingDuration, BookingError, BookingWorkflow, SlotStatus};
use crate::calendar::reservations_to_ics;
use crate::flows;
use crate::model::member::{MemberApplication, MemberTier};
use crate::model::product::ReviewRequest;
use crate::model::tournament::TeamRegistration;
use crate::model::training::{TrainingLevel, TrainingRequest};
use crate::model::user::SignupRequest;
use crate::session::Session;
use crate::slot::TimeSlot;

#[derive(Parser)]
#[command(name = "padel-club", version, about = "Cliente do Padel Club Portugal")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reservar um campo: dia, hora, duração e campo, passo a passo
    Reservar(ReservarArgs),
    /// Listar as minhas reservas, com exportação opcional para calendário
    MinhasReservas {
        /// Escreve as reservas num ficheiro .ics
        #[arg(long)]
        exportar: Option<PathBuf>,
    },
    /// Criar conta
    Registo {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Confirmação da password
        #[arg(long)]
        password2: String,
    },
    /// Iniciar sessão
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Terminar sessão
    Logout,
    /// Mostrar o utilizador autenticado
    Perfil,
    /// Tornar-me sócio
    Socio(SocioArgs),
    /// Torneios do clube
    Torneios {
        #[command(subcommand)]
        action: Option<TorneiosCommand>,
    },
    /// Treinos personalizados
    Treinos {
        #[command(subcommand)]
        action: Option<TreinosCommand>,
    },
    /// Loja do clube
    Loja {
        #[command(subcommand)]
        action: Option<LojaCommand>,
    },
}

#[derive(Args)]
struct ReservarArgs {
    /// Dia da reserva (AAAA-MM-DD)
    #[arg(long)]
    data: NaiveDate,
    /// Hora de início (HH:MM)
    #[arg(long)]
    hora: Option<TimeSlot>,
    /// Duração em minutos: 60, 90 ou 120
    #[arg(long)]
    duracao: Option<BookingDuration>,
    /// Campo 1 a 6
    #[arg(long)]
    campo: Option<u8>,
}

#[derive(Args)]
struct SocioArgs {
    #[arg(long)]
    nome: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    telefone: String,
    #[arg(long)]
    morada: String,
    /// Data de nascimento (AAAA-MM-DD)
    #[arg(long)]
    nascimento: NaiveDate,
    /// individual (50€/ano), familiar (80€/ano) ou estudante (35€/ano)
    #[arg(long, default_value = "individual")]
    tipo: MemberTier,
}

#[derive(Subcommand)]
enum TorneiosCommand {
    /// Listar torneios
    Listar,
    /// Inscrever uma equipa num torneio
    Inscrever {
        #[arg(long)]
        torneio: i64,
        #[arg(long)]
        equipa: String,
        #[arg(long)]
        jogador1: String,
        #[arg(long)]
        jogador2: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        telefone: String,
    },
}

#[derive(Subcommand)]
enum TreinosCommand {
    /// Listar treinadores e pacotes
    Listar,
    /// Pedir um treino personalizado
    Pedir {
        #[arg(long)]
        treinador: i64,
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        telefone: String,
        /// iniciante, intermedio ou avancado
        #[arg(long, default_value = "iniciante")]
        nivel: TrainingLevel,
        #[arg(long)]
        objetivo: String,
        /// Ex: "Segundas e Quartas, 18h-20h"
        #[arg(long)]
        disponibilidade: String,
    },
}

#[derive(Subcommand)]
enum LojaCommand {
    /// Listar artigos e avaliações
    Listar,
    /// Avaliar um artigo
    Avaliar {
        #[arg(long)]
        artigo: i64,
        /// 1 a 5
        #[arg(long)]
        estrelas: u8,
        #[arg(long)]
        comentario: String,
    },
}

pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let api = ClubApi::from_env();
    match cli.command {
        Command::Reservar(args) => reservar(api, args),
        Command::MinhasReservas { exportar } => minhas_reservas(api, exportar),
        Command::Registo { username, email, password, password2 } => {
            let request = SignupRequest {
                username,
                email,
                password: password.clone(),
                password2: password2.clone(),
            };
            let message = flows::create_account(&api, &request, &password2)?;
            println!("{message}");
            Ok(())
        }
        Command::Login { username, password } => {
            let session = Session::login(&api, &username, &password)?;
            if let Some(user) = session.user() {
                println!("Bem-vindo de volta, {}!", user.username);
            }
            Ok(())
        }
        Command::Logout => {
            let mut session = Session::probe(&api);
            session.logout(&api);
            println!("Sessão terminada.");
            Ok(())
        }
        Command::Perfil => perfil(api),
        Command::Socio(args) => socio(api, args),
        Command::Torneios { action } => torneios(api, action),
        Command::Treinos { action } => treinos(api, action),
        Command::Loja { action } => loja(api, action),
    }
}

fn reservar(api: ClubApi, args: ReservarArgs) -> Result<(), Box<dyn Error>> {
    let now = availability::club_now();
    let mut workflow = BookingWorkflow::new(api);
    workflow.select_date(args.data, now)?;

    let Some(hora) = args.hora else {
        println!("Horários para {}:", args.data.format("%d/%m/%Y"));
        for (slot, status) in workflow.slot_statuses(now) {
            let marker = match status {
                SlotStatus::Past => "já passou",
                SlotStatus::Full => "todos os campos ocupados",
                SlotStatus::Available => "disponível",
            };
            println!("  {slot}  {marker}");
        }
        println!("\nEscolhe a hora com --hora HH:MM");
        return Ok(());
    };
    workflow.select_time(hora, now)?;

    let Some(duracao) = args.duracao else {
        println!("Durações:");
        for d in BookingDuration::ALL {
            println!("  {:3} minutos  ({})", d.minutes(), d.label());
        }
        println!("\nEscolhe a duração com --duracao 60|90|120");
        return Ok(());
    };
    workflow.select_duration(duracao)?;

    let Some(campo) = args.campo else {
        let free = workflow.available_courts();
        println!("Campos para {} às {hora} ({}):", args.data.format("%d/%m/%Y"), duracao.label());
        for court in availability::courts() {
            let state = if free.contains(&court) { "✓ Disponível" } else { "✗ Ocupado" };
            println!("  Campo {court}  {state}");
        }
        println!("\nEscolhe o campo com --campo N");
        return Ok(());
    };
    workflow.select_court(campo)?;

    if let Some(summary) = workflow.summary() {
        println!("Resumo da Reserva:");
        println!("{summary}");
    }
    match workflow.submit() {
        Ok(message) => {
            println!("{message}");
            Ok(())
        }
        Err(BookingError::AuthRequired) => {
            // Submission was gated on authentication; confirm before pointing
            // the user at login, the way the page redirected on a 401.
            let session = Session::probe(workflow.backend());
            if session.is_authenticated() {
                println!("A tua conta não tem permissão para reservar.");
            } else {
                println!("É necessário fazer login para reservar!");
                println!("Inicia sessão com: padel-club login --username <nome> --password <password>");
            }
            Err(Box::new(BookingError::AuthRequired))
        }
        Err(e) => Err(Box::new(e)),
    }
}

fn minhas_reservas(api: ClubApi, exportar: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let reservations = match flows::my_reservations(&api) {
        Ok(rows) => rows,
        Err(flows::FlowError::AuthRequired) => {
            println!("Inicia sessão para consultares as tuas reservas.");
            return Err(Box::new(flows::FlowError::AuthRequired));
        }
        Err(e) => return Err(Box::new(e)),
    };
    if reservations.is_empty() {
        println!("Ainda não tens reservas. Faz a tua primeira reserva!");
        return Ok(());
    }
    for r in &reservations {
        println!(
            "Campo {}  {}  {}  {} minutos  Confirmada",
            r.court,
            r.date.format("%d/%m/%Y"),
            r.start,
            r.duration_min
        );
    }
    if let Some(path) = exportar {
        std::fs::write(&path, reservations_to_ics(&reservations))?;
        println!("\nCalendário exportado para {}", path.display());
    }
    Ok(())
}

fn perfil(api: ClubApi) -> Result<(), Box<dyn Error>> {
    let session = Session::probe(&api);
    let Some(user) = session.user() else {
        println!("Não tens sessão iniciada.");
        return Ok(());
    };
    println!("Utilizador: {}", user.username);
    if let Some(email) = &user.email {
        println!("Email: {email}");
    }
    // Membership is best-effort info on the profile page.
    if let Ok(members) = api.members() {
        match members.iter().find(|m| m.user == user.id) {
            Some(member) => {
                println!("Sócio: sim");
                if let Some(since) = member.data_inscricao {
                    println!("Sócio desde: {}", since.format("%d/%m/%Y"));
                }
            }
            None => println!("Sócio: não"),
        }
    }
    Ok(())
}

fn socio(api: ClubApi, args: SocioArgs) -> Result<(), Box<dyn Error>> {
    let session = Session::probe(&api);
    let application = MemberApplication {
        nome_completo: args.nome,
        email: args.email,
        telefone: args.telefone,
        morada: args.morada,
        data_nascimento: args.nascimento,
        tipo_socio: args.tipo,
    };
    let today = availability::club_now().date();
    let message = flows::apply_for_membership(&api, &session, &application, today)?;
    println!("{message}");
    Ok(())
}

fn torneios(api: ClubApi, action: Option<TorneiosCommand>) -> Result<(), Box<dyn Error>> {
    match action.unwrap_or(TorneiosCommand::Listar) {
        TorneiosCommand::Listar => {
            for t in api.tournaments()? {
                let estado = if t.is_open() { "abertas" } else { "fechadas" };
                println!("#{}  {}", t.id, t.nome);
                println!("  Data: {}  Categoria: {}  Prémio: {}€", t.data.format("%d/%m/%Y"), t.categoria, t.premio);
                println!("  Inscrições: {estado}");
                if let Some(descricao) = &t.descricao {
                    println!("  {descricao}");
                }
            }
            Ok(())
        }
        TorneiosCommand::Inscrever { torneio, equipa, jogador1, jogador2, email, telefone } => {
            let tournaments = api.tournaments()?;
            let Some(tournament) = tournaments.iter().find(|t| t.id == torneio) else {
                return Err(format!("torneio {torneio} não encontrado").into());
            };
            let registration = TeamRegistration {
                torneio,
                nome_equipa: equipa,
                jogador1,
                jogador2,
                email,
                telefone,
            };
            let message = flows::register_team(&api, tournament, &registration)?;
            println!("{message}");
            Ok(())
        }
    }
}

fn treinos(api: ClubApi, action: Option<TreinosCommand>) -> Result<(), Box<dyn Error>> {
    match action.unwrap_or(TreinosCommand::Listar) {
        TreinosCommand::Listar => {
            if let Ok(packages) = api.training_packages() {
                if !packages.is_empty() {
                    println!("Pacotes:");
                    for p in packages {
                        let sessions = p.sessoes.map(|s| format!("{s} sessões, ")).unwrap_or_default();
                        println!("  {}  {}€  ({}60 minutos por sessão)", p.nome, p.preco, sessions);
                    }
                    println!();
                }
            }
            println!("Treinadores:");
            for c in api.coaches()? {
                println!("#{}  {}", c.id, c.nome);
                if let Some(s) = &c.especialidade {
                    println!("  Especialidade: {s}");
                }
                if let Some(e) = &c.experiencia {
                    println!("  Experiência: {e}");
                }
                if let Some(cert) = &c.certificacao {
                    println!("  Certificação: {cert}");
                }
            }
            Ok(())
        }
        TreinosCommand::Pedir { treinador, nome, email, telefone, nivel, objetivo, disponibilidade } => {
            let request = TrainingRequest {
                nome,
                email,
                telefone,
                nivel,
                treinador,
                objetivo,
                disponibilidade,
            };
            let message = flows::request_training(&api, &request)?;
            println!("{message}");
            Ok(())
        }
    }
}

fn loja(api: ClubApi, action: Option<LojaCommand>) -> Result<(), Box<dyn Error>> {
    match action.unwrap_or(LojaCommand::Listar) {
        LojaCommand::Listar => {
            for product in api.products()? {
                println!("#{}  {}  {:.2}€", product.id, product.nome, product.preco);
                println!(
                    "  {}  ({:.1}) - {} avaliações",
                    stars(product.avaliacao_media),
                    product.avaliacao_media,
                    product.numero_avaliacoes
                );
                for review in &product.avaliacoes {
                    println!("  {} {}: {}", stars(review.estrelas as f64), review.username, review.comentario);
                }
            }
            Ok(())
        }
        LojaCommand::Avaliar { artigo, estrelas, comentario } => {
            let session = Session::probe(&api);
            let review = ReviewRequest { artigo, estrelas, comentario };
            match flows::submit_review(&api, &session, &review) {
                Ok(message) => {
                    println!("{message}");
                    Ok(())
                }
                Err(flows::FlowError::AuthRequired) => {
                    println!("É necessário fazer login para avaliar!");
                    Err(Box::new(flows::FlowError::AuthRequired))
                }
                Err(e) => Err(Box::new(e)),
            }
        }
    }
}

fn stars(rating: f64) -> String {
    let full = rating.round().clamp(0.0, 5.0) as usize;
    "★".repeat(full) + &"☆".repeat(5 - full)
}

//! MLB Stats API and ESPN scoreboard client
//!
//! Handles all HTTP communication with the upstream sports APIs and decodes
//! responses into typed records.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::RuntimeContext;
use crate::directory::{DirectorySource, SourceError};
use crate::resolver::{Candidate, CandidateId};

/// Client for the MLB Stats API, plus the ESPN scoreboard for live scores
pub struct StatsClient {
    client: Client,
    stats_url: String,
    scores_url: String,
    sport_id: u32,
}

impl StatsClient {
    /// Create a new client from runtime context
    pub fn new(ctx: &RuntimeContext) -> Result<Self> {
        Self::with_urls(
            ctx.stats_url(),
            ctx.scores_url(),
            ctx.sport_id(),
            Duration::from_secs(ctx.timeout()),
        )
    }

    pub fn with_urls(
        stats_url: &str,
        scores_url: &str,
        sport_id: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("mlbq/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            stats_url: stats_url.trim_end_matches('/').to_string(),
            scores_url: scores_url.trim_end_matches('/').to_string(),
            sport_id,
        })
    }

    /// Make a GET request and return the status with the raw body
    async fn fetch(&self, url: &str) -> Result<(StatusCode, String), SourceError> {
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| SourceError::Request {
                url: url.to_string(),
                source,
            })?;

        log::trace!("{status} from {url}: {} bytes", body.len());
        Ok((status, body))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let (status, body) = self.fetch(url).await?;
        if !status.is_success() {
            return Err(status_to_error(status, url));
        }
        decode(url, &body)
    }

    /// Like `get`, but a 404 means the object doesn't exist
    async fn get_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, SourceError> {
        let (status, body) = self.fetch(url).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_to_error(status, url));
        }
        decode(url, &body).map(Some)
    }

    // --- API Methods ---

    /// Get all teams for the configured sport
    pub async fn get_teams(&self) -> Result<Vec<Team>, SourceError> {
        let url = format!("{}/teams?sportId={}", self.stats_url, self.sport_id);
        let response: TeamsResponse = self.get(&url).await?;
        Ok(response.teams)
    }

    /// Search active players by name
    pub async fn search_people(&self, name: &str) -> Result<Vec<Person>, SourceError> {
        let url = format!(
            "{}/people/search?names={}&active=true",
            self.stats_url,
            urlencoding::encode(name)
        );
        let response: PeopleResponse = self.get(&url).await?;
        Ok(response.people)
    }

    /// Get a single player by id
    pub async fn get_person(&self, person_id: &str) -> Result<Option<Person>, SourceError> {
        let url = format!("{}/people/{}", self.stats_url, urlencoding::encode(person_id));
        let response: Option<PeopleResponse> = self.get_optional(&url).await?;
        Ok(response.and_then(|r| r.people.into_iter().next()))
    }

    /// Get league standings for a season
    pub async fn get_standings(
        &self,
        season: &str,
        league_ids: &str,
    ) -> Result<Vec<StandingsRecord>, SourceError> {
        let url = format!(
            "{}/standings?leagueId={}&season={}&hydrate=division",
            self.stats_url,
            urlencoding::encode(league_ids),
            urlencoding::encode(season)
        );
        let response: StandingsResponse = self.get(&url).await?;
        Ok(response.records)
    }

    /// Get a player's season hitting line, if the season has any splits
    pub async fn get_season_stats(
        &self,
        person_id: &str,
        season: &str,
    ) -> Result<Option<HittingLine>, SourceError> {
        let url = format!(
            "{}/people/{}/stats?stats=season&season={}",
            self.stats_url,
            urlencoding::encode(person_id),
            urlencoding::encode(season)
        );
        let response: StatsResponse = self.get(&url).await?;
        Ok(response.season_line())
    }

    /// Get today's scoreboard
    pub async fn get_scoreboard(&self) -> Result<Vec<GameScore>, SourceError> {
        let url = format!("{}/scoreboard", self.scores_url);
        let scoreboard: Scoreboard = self.get(&url).await?;
        Ok(scoreboard.games())
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|source| SourceError::Malformed {
        url: url.to_string(),
        source,
    })
}

fn status_to_error(status: StatusCode, url: &str) -> SourceError {
    let hint = match status {
        StatusCode::NOT_FOUND => Some("The requested resource was not found"),
        StatusCode::TOO_MANY_REQUESTS => Some("The API is rate limiting requests; try again later"),
        StatusCode::SERVICE_UNAVAILABLE => Some("The stats service may be down for maintenance"),
        StatusCode::BAD_REQUEST => Some("Invalid request parameters (check --season and --leagues)"),
        _ => None,
    };

    SourceError::Status {
        status,
        url: url.to_string(),
        hint,
    }
}

#[async_trait]
impl DirectorySource for StatsClient {
    async fn list_all_teams(&self) -> Result<Vec<Candidate>, SourceError> {
        let teams = self.get_teams().await?;
        Ok(teams.iter().map(Candidate::from).collect())
    }

    async fn search_players_by_name(&self, name: &str) -> Result<Vec<Candidate>, SourceError> {
        let people = self.search_people(name).await?;
        Ok(people.iter().map(Candidate::from).collect())
    }

    async fn player_by_id(&self, id: &str) -> Result<Option<Candidate>, SourceError> {
        let person = self.get_person(id).await?;
        Ok(person.as_ref().map(Candidate::from))
    }
}

/// Directory source that keeps the records behind the candidates it returns.
///
/// Each fetch replaces the kept records of that kind, so after a resolution
/// the winning candidate's full record is available without another request.
pub struct RecordingSource<'a> {
    client: &'a StatsClient,
    teams: Mutex<Vec<Team>>,
    people: Mutex<Vec<Person>>,
}

impl<'a> RecordingSource<'a> {
    pub fn new(client: &'a StatsClient) -> Self {
        Self {
            client,
            teams: Mutex::new(Vec::new()),
            people: Mutex::new(Vec::new()),
        }
    }

    /// Team record from the last team fetch
    pub fn team(&self, id: &CandidateId) -> Option<Team> {
        let teams = self.teams.lock().unwrap_or_else(PoisonError::into_inner);
        teams.iter().find(|t| CandidateId::Numeric(t.id) == *id).cloned()
    }

    /// Player record from the last player fetch
    pub fn person(&self, id: &CandidateId) -> Option<Person> {
        let people = self.people.lock().unwrap_or_else(PoisonError::into_inner);
        people.iter().find(|p| CandidateId::Numeric(p.id) == *id).cloned()
    }

    fn keep_people(&self, people: Vec<Person>) {
        *self.people.lock().unwrap_or_else(PoisonError::into_inner) = people;
    }
}

#[async_trait]
impl DirectorySource for RecordingSource<'_> {
    async fn list_all_teams(&self) -> Result<Vec<Candidate>, SourceError> {
        let teams = self.client.get_teams().await?;
        let candidates = teams.iter().map(Candidate::from).collect();
        *self.teams.lock().unwrap_or_else(PoisonError::into_inner) = teams;
        Ok(candidates)
    }

    async fn search_players_by_name(&self, name: &str) -> Result<Vec<Candidate>, SourceError> {
        let people = self.client.search_people(name).await?;
        let candidates = people.iter().map(Candidate::from).collect();
        self.keep_people(people);
        Ok(candidates)
    }

    async fn player_by_id(&self, id: &str) -> Result<Option<Candidate>, SourceError> {
        let person = self.client.get_person(id).await?;
        let candidate = person.as_ref().map(Candidate::from);
        self.keep_people(person.into_iter().collect());
        Ok(candidate)
    }
}

// --- API Types ---

/// `{ "id": .., "name": .. }` reference embedded in most records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NamedRef {
    pub fn name_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub division: Option<NamedRef>,
    #[serde(default)]
    pub league: Option<NamedRef>,
    #[serde(default)]
    pub venue: Option<NamedRef>,
}

impl From<&Team> for Candidate {
    fn from(team: &Team) -> Self {
        let candidate = Candidate::new(team.name.clone(), team.id);
        match team.division.as_ref().and_then(|d| d.name.clone()) {
            Some(division) => candidate.with_detail(division),
            None => candidate,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<Team>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: u64,
    pub full_name: String,
    #[serde(default)]
    pub primary_position: Option<Position>,
    #[serde(default)]
    pub current_team: Option<NamedRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl From<&Person> for Candidate {
    fn from(person: &Person) -> Self {
        let candidate = Candidate::new(person.full_name.clone(), person.id);
        match person.current_team.as_ref().and_then(|t| t.name.clone()) {
            Some(team) => candidate.with_detail(team),
            None => candidate,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PeopleResponse {
    #[serde(default)]
    people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    records: Vec<StandingsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRecord {
    pub league: NamedRef,
    #[serde(default)]
    pub division: Option<NamedRef>,
    #[serde(default)]
    pub team_records: Vec<TeamRecord>,
}

impl StandingsRecord {
    /// League display name, falling back to the well-known MLB league ids
    pub fn league_name(&self) -> String {
        if let Some(name) = &self.league.name {
            return name.clone();
        }
        match self.league.id {
            Some(103) => "American League".to_string(),
            Some(104) => "National League".to_string(),
            Some(id) => format!("League {id}"),
            None => "Unknown League".to_string(),
        }
    }

    /// Division display name, or its id when the division wasn't hydrated
    pub fn division_name(&self) -> Option<String> {
        let division = self.division.as_ref()?;
        match (&division.name, division.id) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(id)) => Some(format!("{} (division {id})", self.league_name())),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team: NamedRef,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub winning_percentage: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    stats: Vec<StatGroup>,
}

impl StatsResponse {
    fn season_line(self) -> Option<HittingLine> {
        self.stats
            .into_iter()
            .next()
            .and_then(|group| group.splits.into_iter().next())
            .map(|split| split.stat)
    }
}

#[derive(Debug, Deserialize)]
struct StatGroup {
    #[serde(default)]
    splits: Vec<StatSplit>,
}

#[derive(Debug, Deserialize)]
struct StatSplit {
    stat: HittingLine,
}

/// Season batting line; every field may be absent (e.g. for pitchers)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HittingLine {
    #[serde(default)]
    pub avg: Option<String>,
    #[serde(default)]
    pub home_runs: Option<u32>,
    #[serde(default)]
    pub rbi: Option<u32>,
    #[serde(default)]
    pub ops: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Scoreboard {
    #[serde(default)]
    events: Vec<ScoreboardEvent>,
}

#[derive(Debug, Deserialize)]
struct ScoreboardEvent {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    competitions: Vec<Competition>,
}

#[derive(Debug, Deserialize)]
struct Competition {
    status: CompetitionStatus,
    #[serde(default)]
    competitors: Vec<Competitor>,
}

#[derive(Debug, Deserialize)]
struct CompetitionStatus {
    #[serde(rename = "type")]
    kind: StatusType,
}

#[derive(Debug, Deserialize)]
struct StatusType {
    detail: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Competitor {
    home_away: String,
    #[serde(default)]
    score: Option<String>,
    team: CompetitorTeam,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompetitorTeam {
    display_name: String,
}

/// One game on the scoreboard, flattened for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameScore {
    pub matchup: String,
    pub score: String,
    pub status: String,
}

impl Scoreboard {
    /// Flatten events into games, skipping any without both a home and an away side
    fn games(self) -> Vec<GameScore> {
        self.events
            .into_iter()
            .filter_map(|event| {
                let label = event.name.clone().unwrap_or_else(|| "unnamed event".to_string());
                let game = event.competitions.into_iter().next().and_then(GameScore::from_competition);
                if game.is_none() {
                    log::warn!("skipping scoreboard event without home/away teams: {label}");
                }
                game
            })
            .collect()
    }
}

impl GameScore {
    fn from_competition(competition: Competition) -> Option<Self> {
        let side = |which: &str| {
            competition
                .competitors
                .iter()
                .find(|c| c.home_away == which)
        };
        let home = side("home")?;
        let away = side("away")?;
        let runs = |c: &Competitor| c.score.clone().unwrap_or_else(|| "0".to_string());

        Some(Self {
            matchup: format!(
                "{} @ {}",
                away.team.display_name, home.team.display_name
            ),
            score: format!("{} - {}", runs(away), runs(home)),
            status: competition.status.kind.detail.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{MatchResult, Resolver};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> StatsClient {
        StatsClient::with_urls(&server.uri(), &server.uri(), 1, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_team_deserialize() {
        let json = r#"{
            "id": 111,
            "name": "Boston Red Sox",
            "locationName": "Boston",
            "abbreviation": "BOS",
            "division": {"id": 201, "name": "American League East"},
            "league": {"id": 103, "name": "American League"},
            "venue": {"id": 3, "name": "Fenway Park"}
        }"#;

        let team: Team = serde_json::from_str(json).unwrap();
        assert_eq!(team.id, 111);
        assert_eq!(team.location_name.as_deref(), Some("Boston"));
        assert_eq!(team.venue.unwrap().name.as_deref(), Some("Fenway Park"));
    }

    #[test]
    fn test_team_missing_name_is_rejected() {
        let json = r#"{"id": 111}"#;
        assert!(serde_json::from_str::<Team>(json).is_err());
    }

    #[test]
    fn test_candidate_from_person() {
        let person: Person = serde_json::from_value(json!({
            "id": 592450,
            "fullName": "Aaron Judge",
            "primaryPosition": {"name": "Outfielder", "abbreviation": "RF"},
            "currentTeam": {"id": 147, "name": "New York Yankees"}
        }))
        .unwrap();

        let candidate = Candidate::from(&person);
        assert_eq!(candidate.display_name, "Aaron Judge");
        assert_eq!(candidate.detail.as_deref(), Some("New York Yankees"));
    }

    #[test]
    fn test_league_name_fallback() {
        let record: StandingsRecord =
            serde_json::from_value(json!({"league": {"id": 104}, "teamRecords": []})).unwrap();
        assert_eq!(record.league_name(), "National League");
        assert_eq!(record.division_name(), None);
    }

    #[test]
    fn test_division_name() {
        let hydrated: StandingsRecord = serde_json::from_value(json!({
            "league": {"id": 103},
            "division": {"id": 201, "name": "American League East"}
        }))
        .unwrap();
        assert_eq!(hydrated.division_name().as_deref(), Some("American League East"));

        let bare: StandingsRecord =
            serde_json::from_value(json!({"league": {"id": 103}, "division": {"id": 202}})).unwrap();
        assert_eq!(
            bare.division_name().as_deref(),
            Some("American League (division 202)")
        );
    }

    #[test]
    fn test_scoreboard_games() {
        let scoreboard: Scoreboard = serde_json::from_value(json!({
            "events": [
                {
                    "name": "Boston Red Sox at New York Yankees",
                    "competitions": [{
                        "status": {"type": {"detail": "Top 3rd"}},
                        "competitors": [
                            {"homeAway": "home", "score": "2", "team": {"displayName": "New York Yankees"}},
                            {"homeAway": "away", "team": {"displayName": "Boston Red Sox"}}
                        ]
                    }]
                },
                {
                    "name": "Broken",
                    "competitions": [{
                        "status": {"type": {"detail": "Final"}},
                        "competitors": []
                    }]
                }
            ]
        }))
        .unwrap();

        let games = scoreboard.games();
        assert_eq!(
            games,
            vec![GameScore {
                matchup: "Boston Red Sox @ New York Yankees".to_string(),
                score: "0 - 2".to_string(),
                status: "Top 3rd".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_list_all_teams() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .and(query_param("sportId", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "teams": [
                    {"id": 111, "name": "Boston Red Sox", "division": {"id": 201, "name": "American League East"}},
                    {"id": 145, "name": "Chicago White Sox"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let teams = client.list_all_teams().await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].detail.as_deref(), Some("American League East"));
        assert_eq!(teams[1].detail, None);
    }

    #[tokio::test]
    async fn test_search_players_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/people/search"))
            .and(query_param("names", "Judge"))
            .and(query_param("active", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "people": [
                    {"id": 2, "fullName": "Judge B"},
                    {"id": 1, "fullName": "Judge A"}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let players = client.search_players_by_name("Judge").await.unwrap();
        let names: Vec<_> = players.iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["Judge B", "Judge A"]);
    }

    #[tokio::test]
    async fn test_search_players_missing_people_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/people/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search_players_by_name("Nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_player_exists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/people/660271"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "people": [{"id": 660271, "fullName": "Shohei Ohtani"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/people/1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Object not found"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.player_exists("660271").await.unwrap());
        assert!(!client.player_exists("1").await.unwrap());
    }

    #[tokio::test]
    async fn test_recording_source_fetches_player_id_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/people/660271"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "people": [{"id": 660271, "fullName": "Shohei Ohtani", "currentTeam": {"id": 119, "name": "Los Angeles Dodgers"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let source = RecordingSource::new(&client);
        let result = Resolver::new(&source).player("660271").await.unwrap();

        let candidate = match &result {
            MatchResult::Exact { candidate } => candidate,
            other => panic!("Expected exact match, got {other:?}"),
        };
        let person = source.person(&candidate.id).unwrap();
        assert_eq!(person.full_name, "Shohei Ohtani");
        assert_eq!(person.current_team.unwrap().name.as_deref(), Some("Los Angeles Dodgers"));
    }

    #[tokio::test]
    async fn test_recording_source_keeps_team_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "teams": [
                    {"id": 111, "name": "Boston Red Sox", "venue": {"id": 3, "name": "Fenway Park"}},
                    {"id": 145, "name": "Chicago White Sox"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let source = RecordingSource::new(&client);
        let result = Resolver::new(&source).team("Red Sox").await.unwrap();

        let team = result.candidate().and_then(|c| source.team(&c.id)).unwrap();
        assert_eq!(team.id, 111);
        assert_eq!(team.venue.unwrap().name.as_deref(), Some("Fenway Park"));
        assert!(source.team(&CandidateId::Text("111".to_string())).is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.list_all_teams().await.unwrap_err();
        match err {
            SourceError::Status { status, hint, .. } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert!(hint.is_some());
            }
            other => panic!("Expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_teams().await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_source() {
        let client =
            StatsClient::with_urls("http://127.0.0.1:9", "http://127.0.0.1:9", 1, Duration::from_secs(2))
                .unwrap();
        let err = client.list_all_teams().await.unwrap_err();
        assert!(matches!(err, SourceError::Request { .. }));
    }

    #[tokio::test]
    async fn test_season_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/people/592450/stats"))
            .and(query_param("stats", "season"))
            .and(query_param("season", "2024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stats": [{"splits": [{"stat": {"avg": ".322", "homeRuns": 58, "rbi": 144, "ops": "1.159"}}]}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/people/1/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stats": [{"splits": []}]})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let line = client.get_season_stats("592450", "2024").await.unwrap().unwrap();
        assert_eq!(line.avg.as_deref(), Some(".322"));
        assert_eq!(line.home_runs, Some(58));
        assert!(client.get_season_stats("1", "2024").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_standings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .and(query_param("leagueId", "103,104"))
            .and(query_param("season", "2024"))
            .and(query_param("hydrate", "division"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{
                    "league": {"id": 103},
                    "teamRecords": [
                        {"team": {"id": 147, "name": "New York Yankees"}, "wins": 94, "losses": 68, "winningPercentage": ".580"}
                    ]
                }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let records = client.get_standings("2024", "103,104").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].league_name(), "American League");
        assert_eq!(records[0].team_records[0].wins, 94);
    }
}

use mapamente_audio::{ElevenLabsClient, VoiceSettings, DEFAULT_VOICE_ID};
use mockito::Matcher;

#[tokio::test]
async fn test_text_to_speech_returns_audio() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", format!("/text-to-speech/{}", DEFAULT_VOICE_ID).as_str())
        .match_header("xi-api-key", "secret")
        .match_body(Matcher::Json(serde_json::json!({
            "text": "Olá, tudo bem?",
            "model_id": "eleven_multilingual_v2",
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75,
                "style": 0.0,
                "use_speaker_boost": true
            }
        })))
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(&[0xffu8, 0xfb, 0x90, 0x00][..])
        .create_async()
        .await;

    let client = ElevenLabsClient::with_base_url("secret", server.url()).unwrap();
    let audio = client
        .text_to_speech(DEFAULT_VOICE_ID, "Olá, tudo bem?", &VoiceSettings::default())
        .await;

    assert_eq!(audio, Some(vec![0xff, 0xfb, 0x90, 0x00]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_text_to_speech_error_is_none() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", Matcher::Any)
        .with_status(401)
        .with_body(r#"{"detail": {"status": "invalid_api_key"}}"#)
        .create_async()
        .await;

    let client = ElevenLabsClient::with_base_url("wrong", server.url()).unwrap();
    assert!(client
        .text_to_speech("voz", "texto", &VoiceSettings::default())
        .await
        .is_none());
    assert!(client
        .try_text_to_speech("voz", "texto", &VoiceSettings::default())
        .await
        .is_err());
}

#[tokio::test]
async fn test_verify_api_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/user")
        .match_header("xi-api-key", "good")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    server
        .mock("GET", "/user")
        .match_header("xi-api-key", "bad")
        .with_status(401)
        .create_async()
        .await;

    let good = ElevenLabsClient::with_base_url("good", server.url()).unwrap();
    let bad = ElevenLabsClient::with_base_url("bad", server.url()).unwrap();

    assert!(good.verify_api_key().await);
    assert!(!bad.verify_api_key().await);
}

#[tokio::test]
async fn test_verify_api_key_unreachable() {
    let client = ElevenLabsClient::with_base_url("key", "http://127.0.0.1:1").unwrap();
    assert!(!client.verify_api_key().await);
}

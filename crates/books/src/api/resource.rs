use std::marker::PhantomData;

use books_core::models::Comment;
use books_core::parser::{EnvelopeParser, Enveloped, Listing};
use books_core::path::ResourcePath;
use books_core::payload::Attachments;
use books_core::query::QueryParameters;
use books_core::resource::ResourceKind;
use books_core::response::BinaryFile;
use books_core::router::{route, route_file, Expectation, ResponseOutcome};
use books_core::{Result, Verb};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dispatcher::Dispatcher;
use crate::transport::Transport;

/// Generic operations shared by every resource kind
///
/// Borrows the client's dispatcher; creating one is free.
#[derive(Debug)]
pub struct ResourceApi<'a, T, K> {
    dispatcher: &'a Dispatcher<T>,
    kind: PhantomData<K>,
}

impl<'a, T, K> ResourceApi<'a, T, K>
where
    T: Transport,
    K: ResourceKind,
{
    pub fn new(dispatcher: &'a Dispatcher<T>) -> Self {
        Self {
            dispatcher,
            kind: PhantomData,
        }
    }

    pub fn dispatcher(&self) -> &'a Dispatcher<T> {
        self.dispatcher
    }

    /// `GET /{collection}`
    pub async fn list(&self, filters: Option<&QueryParameters>) -> Result<Listing<K::Item>> {
        self.fetch_list(&K::collection_path(), filters).await
    }

    /// `GET /{collection}/{id}`
    pub async fn get(&self, id: &str, filters: Option<&QueryParameters>) -> Result<K::Item> {
        self.fetch_object::<K::Item, ()>(
            Verb::Get,
            &K::item_path(id),
            filters,
            None,
            Attachments::none(),
        )
        .await
    }

    /// `POST /{collection}`
    pub async fn create(
        &self,
        object: &K::Item,
        attachments: Attachments,
        filters: Option<&QueryParameters>,
    ) -> Result<K::Item> {
        self.fetch_object(
            Verb::Post,
            &K::collection_path(),
            filters,
            Some(object),
            attachments,
        )
        .await
    }

    /// `PUT /{collection}/{id}`
    pub async fn update(
        &self,
        id: &str,
        object: &K::Item,
        attachments: Attachments,
        filters: Option<&QueryParameters>,
    ) -> Result<K::Item> {
        self.fetch_object(
            Verb::Put,
            &K::item_path(id),
            filters,
            Some(object),
            attachments,
        )
        .await
    }

    /// `DELETE /{collection}/{id}`, returning the server's confirmation
    pub async fn delete(&self, id: &str) -> Result<String> {
        self.fetch_message::<()>(
            Verb::Delete,
            &K::item_path(id),
            None,
            None,
            Attachments::none(),
        )
        .await
    }

    /// `GET /{collection}/{id}/comments`
    pub async fn comments(&self, id: &str) -> Result<Listing<Comment>> {
        self.fetch_list(&K::item_path(id).segment("comments"), None)
            .await
    }

    /// Dispatch and route by `expectation`
    pub async fn call<R, B>(
        &self,
        verb: Verb,
        path: &ResourcePath,
        filters: Option<&QueryParameters>,
        body: Option<&B>,
        attachments: Attachments,
        expectation: Expectation,
    ) -> Result<ResponseOutcome<R>>
    where
        R: Enveloped + DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let raw = self
            .dispatcher
            .send(verb, path, filters, body, attachments)
            .await?;

        route(&raw, expectation, &EnvelopeParser::<R>::new())
    }

    /// Binary download routed as a file outcome
    pub async fn call_file<R>(
        &self,
        path: &ResourcePath,
        filters: Option<&QueryParameters>,
    ) -> Result<ResponseOutcome<R>> {
        Ok(route_file(self.download(path, filters).await?))
    }

    pub async fn fetch_object<R, B>(
        &self,
        verb: Verb,
        path: &ResourcePath,
        filters: Option<&QueryParameters>,
        body: Option<&B>,
        attachments: Attachments,
    ) -> Result<R>
    where
        R: Enveloped + DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let raw = self
            .dispatcher
            .send(verb, path, filters, body, attachments)
            .await?;

        let parser = EnvelopeParser::<R>::new();
        route(&raw, Expectation::Single, &parser)?.object()
    }

    pub async fn fetch_list<R>(
        &self,
        path: &ResourcePath,
        filters: Option<&QueryParameters>,
    ) -> Result<Listing<R>>
    where
        R: Enveloped + DeserializeOwned,
    {
        let raw = self
            .dispatcher
            .send::<()>(Verb::Get, path, filters, None, Attachments::none())
            .await?;

        let parser = EnvelopeParser::<R>::new();
        route(&raw, Expectation::List, &parser)?.list()
    }

    pub async fn fetch_message<B>(
        &self,
        verb: Verb,
        path: &ResourcePath,
        filters: Option<&QueryParameters>,
        body: Option<&B>,
        attachments: Attachments,
    ) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let raw = self
            .dispatcher
            .send(verb, path, filters, body, attachments)
            .await?;

        let parser = EnvelopeParser::<K::Item>::new();
        route(&raw, Expectation::Message, &parser)?.message()
    }

    /// Raw bytes of a file resource; never parsed
    pub async fn download(
        &self,
        path: &ResourcePath,
        filters: Option<&QueryParameters>,
    ) -> Result<BinaryFile> {
        self.dispatcher.download(path, filters).await
    }
}
